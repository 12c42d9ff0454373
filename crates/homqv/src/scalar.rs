//! Seed-to-scalar derivation.
//!
//! Ed25519 turns a 32-byte seed into its secret scalar by hashing the seed with
//! SHA-512, keeping the low 32 bytes and clamping them (RFC 8032, Section 5.1.5).
//! Deriving key-agreement scalars the same way lets one long-term key pair serve
//! both signing and key agreement.
//!
//! The derivation is a [`ScalarDerivation`] strategy so the agreement math does
//! not depend on which signature scheme produced the seed.

use curve25519_dalek::scalar::{clamp_integer, Scalar};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::SEED_SIZE;

/// Strategy turning raw private key material into a curve scalar.
pub trait ScalarDerivation {
    /// Derive the scalar for a seed.
    fn derive(seed: &[u8; SEED_SIZE]) -> Scalar;
}

/// The Ed25519 secret-scalar derivation (SHA-512, low half, clamped).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Derivation;

impl ScalarDerivation for Ed25519Derivation {
    fn derive(seed: &[u8; SEED_SIZE]) -> Scalar {
        derive_scalar(seed)
    }
}

/// Clamp the low 32 bytes of a 64-byte digest and reduce modulo the group order.
///
/// Clamping clears the bottom 3 bits, clears the top bit and sets the
/// second-highest bit.
pub fn clamp_scalar(digest: &[u8; 64]) -> Scalar {
    let mut low = [0u8; 32];
    low.copy_from_slice(&digest[..32]);
    let scalar = Scalar::from_bytes_mod_order(clamp_integer(low));
    low.zeroize();
    scalar
}

/// Derive a scalar from a private key seed: `clamp(SHA-512(seed)[..32])`.
pub fn derive_scalar(seed: &[u8; SEED_SIZE]) -> Scalar {
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&Sha512::digest(seed));
    let scalar = clamp_scalar(&digest);
    digest.zeroize();
    scalar
}

/// A party's long-term scalar. Derived once, read-only afterwards.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StaticScalar {
    inner: Scalar,
}

impl StaticScalar {
    /// Derive the static scalar from a seed using the Ed25519 derivation.
    pub fn from_seed(seed: &[u8; SEED_SIZE]) -> Self {
        Self::with_derivation::<Ed25519Derivation>(seed)
    }

    /// Derive the static scalar from a seed using a custom strategy.
    pub fn with_derivation<D: ScalarDerivation>(seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            inner: D::derive(seed),
        }
    }

    pub(crate) fn as_scalar(&self) -> &Scalar {
        &self.inner
    }
}

impl std::fmt::Debug for StaticScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticScalar(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::EdwardsPoint;
    use hex_literal::hex;

    #[test]
    fn test_derived_scalar_matches_ed25519_public_key() {
        let seed = [0x11u8; 32];
        let scalar = derive_scalar(&seed);
        let public = EdwardsPoint::mul_base(&scalar).compress().to_bytes();
        let expected = ed25519_dalek::SigningKey::from_bytes(&seed)
            .verifying_key()
            .to_bytes();
        assert_eq!(public, expected);
    }

    #[test]
    fn test_derive_scalar_known_value() {
        let scalar = derive_scalar(&[0x01u8; 32]);
        assert_eq!(
            scalar.to_bytes(),
            hex!("caf0abcdd7a7e01b3b62780f360ebd2fae1a1703528651b69bc176c088bef30e")
        );
    }

    #[test]
    fn test_clamp_scalar_ignores_high_half() {
        let mut a = [0xabu8; 64];
        let mut b = a;
        b[32..].copy_from_slice(&[0u8; 32]);
        assert_eq!(clamp_scalar(&a), clamp_scalar(&b));
        a[0] ^= 0x08;
        assert_ne!(clamp_scalar(&a), clamp_scalar(&b));
    }

    #[test]
    fn test_clamp_scalar_clears_low_bits() {
        // Low three bits are cleared before reduction, so these collide.
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        a[0] = 0x01;
        b[0] = 0x07;
        assert_eq!(clamp_scalar(&a), clamp_scalar(&b));
    }

    #[test]
    fn test_custom_derivation() {
        struct Raw;
        impl ScalarDerivation for Raw {
            fn derive(seed: &[u8; SEED_SIZE]) -> Scalar {
                Scalar::from_bytes_mod_order(*seed)
            }
        }

        let seed = [0x05u8; 32];
        let custom = StaticScalar::with_derivation::<Raw>(&seed);
        let default = StaticScalar::from_seed(&seed);
        assert_eq!(*custom.as_scalar(), Scalar::from_bytes_mod_order(seed));
        assert_ne!(custom.as_scalar(), default.as_scalar());
    }

    #[test]
    fn test_static_scalar_debug_is_redacted() {
        let s = StaticScalar::from_seed(&[0x09u8; 32]);
        assert_eq!(format!("{s:?}"), "StaticScalar(..)");
    }
}
