//! # homqv
//!
//! One-pass HMQV-style key agreement over the Ed25519 group.
//!
//! A client holding a long-term Ed25519 key and a fresh ephemeral key derives a
//! shared secret with a server identified by an opaque [`Identifier`]. The
//! client sends its static public key and one ephemeral public value; the server
//! needs nothing back to compute the same secret. Authentication is implicit:
//! only the holder of the server's long-term key reaches the same point.
//!
//! ```text
//! e     = clamp(SHA-512(Y || id)[..32])
//! Connect: sigma = [8] * (b*e + y) * A
//! Accept:  sigma = [8] * a * (e*B + Y)
//! ```
//!
//! ## Modules
//!
//! - [`scalar`] — Seed-to-scalar derivation (SHA-512 + clamping)
//! - [`binding`] — The exponent binding an ephemeral value to an identifier
//! - [`point`] — Public point decoding and cofactor clearing
//! - [`identifier`] — Non-empty party identifiers
//! - [`ephemeral`] — Single-use ephemeral secrets
//! - [`client`] — The initiating side (`connect`)
//! - [`server`] — The accepting side (`accept`)
//! - [`secret`] — The shared secret output

pub mod binding;
pub mod client;
pub mod ephemeral;
pub mod identifier;
pub mod point;
pub mod scalar;
pub mod secret;
pub mod server;

pub use client::{Client, Recipient};
pub use ephemeral::EphemeralSecret;
pub use identifier::Identifier;
pub use point::DecodeError;
pub use secret::SharedSecret;
pub use server::{Sender, Server};

/// Size of an Ed25519 private key seed in bytes.
pub const SEED_SIZE: usize = 32;

/// Size of a compressed Edwards point (public keys and ephemeral values).
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of the shared secret output.
pub const SHARED_SECRET_SIZE: usize = 32;

/// Error types for key agreement operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HomqvError {
    /// The recipient's static public key is not a valid point encoding.
    #[error("invalid recipient public key: {0}")]
    InvalidPublicKey(#[source] DecodeError),

    /// The sender's static public key is not a valid point encoding.
    #[error("invalid sender public key: {0}")]
    InvalidSenderKey(#[source] DecodeError),

    /// The sender's ephemeral public key is not a valid point encoding.
    #[error("invalid sender nonce: {0}")]
    InvalidSenderNonce(#[source] DecodeError),

    /// A private key seed had the wrong length.
    #[error("invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// An identifier was empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,
}

/// Convenience result type for key agreement operations.
pub type Result<T> = std::result::Result<T, HomqvError>;

/// Copy a seed slice into a fixed-size array, checking its length.
pub(crate) fn seed_from_slice(bytes: &[u8]) -> Result<[u8; SEED_SIZE]> {
    <[u8; SEED_SIZE]>::try_from(bytes).map_err(|_| HomqvError::InvalidSeedLength {
        expected: SEED_SIZE,
        actual: bytes.len(),
    })
}
