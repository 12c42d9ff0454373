//! Integration test crate for the homqv key agreement.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise both sides of the exchange together.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p homqv-integration-tests
//! ```
