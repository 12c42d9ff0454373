//! Exponent binding.
//!
//! `e = clamp(SHA-512(Y || id)[..32])` ties the ephemeral public value `Y` to the
//! accepting party's identifier. The input order is fixed: ephemeral bytes first,
//! identifier second. Both sides must hash the same bytes in the same order or
//! agreement fails silently.

use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

use crate::identifier::Identifier;
use crate::scalar::clamp_scalar;

/// Compute the bound exponent for an ephemeral public encoding and identifier.
///
/// `ephemeral_public` is hashed exactly as given; the server passes the bytes it
/// received, the client the encoding of its own ephemeral key.
pub fn bound_exponent(ephemeral_public: &[u8], identifier: &Identifier) -> Scalar {
    let hash = Sha512::new()
        .chain_update(ephemeral_public)
        .chain_update(identifier.as_bytes())
        .finalize();
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&hash);
    clamp_scalar(&digest)
}
