//! Public point decoding and cofactor clearing.
//!
//! Public keys and ephemeral values arrive as 32-byte compressed Edwards
//! points. A decoded point may carry a small-order component; every agreement
//! result is multiplied by the cofactor before encoding, which projects it into
//! the prime-order subgroup and discards that component.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

use crate::PUBLIC_KEY_SIZE;

/// Reasons a byte string is not a usable point encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The encoding does not have the compressed point length.
    #[error("invalid encoding length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// The y-coordinate has no matching x on the curve.
    #[error("not a point on the curve")]
    NotOnCurve,
}

/// A decoded curve point received from another party.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicPoint {
    inner: EdwardsPoint,
}

impl PublicPoint {
    /// Decode a compressed Edwards point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let compressed =
            CompressedEdwardsY::from_slice(bytes).map_err(|_| DecodeError::InvalidLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })?;
        let inner = compressed.decompress().ok_or(DecodeError::NotOnCurve)?;
        Ok(Self { inner })
    }

    /// Canonical 32-byte compressed encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.inner.compress().to_bytes()
    }

    /// Whether the point lies in the prime-order subgroup.
    pub fn is_torsion_free(&self) -> bool {
        self.inner.is_torsion_free()
    }

    /// Whether the point has small order (lies entirely in the torsion subgroup).
    pub fn is_small_order(&self) -> bool {
        self.inner.is_small_order()
    }

    pub(crate) fn as_edwards(&self) -> &EdwardsPoint {
        &self.inner
    }
}

impl From<EdwardsPoint> for PublicPoint {
    fn from(inner: EdwardsPoint) -> Self {
        Self { inner }
    }
}

/// Decode a point, logging the rejection reason or any small-order component.
pub(crate) fn decode(role: &'static str, bytes: &[u8]) -> Result<PublicPoint, DecodeError> {
    let point = PublicPoint::from_bytes(bytes).inspect_err(|e| {
        tracing::debug!(role, error = %e, "homqv: rejected point encoding");
    })?;
    if !point.is_torsion_free() {
        tracing::debug!(
            role,
            small_order = point.is_small_order(),
            "homqv: point has a small-order component, cofactor clearing applies"
        );
    }
    Ok(point)
}

/// Multiply by the cofactor (8) and encode. Final step of every agreement.
pub fn clear_cofactor(point: &EdwardsPoint) -> [u8; 32] {
    point.mul_by_cofactor().compress().to_bytes()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
    use curve25519_dalek::scalar::Scalar;
    use curve25519_dalek::traits::Identity;

    /// The point (0, -1), of order 2.
    pub(crate) fn order_two_point() -> EdwardsPoint {
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0xec;
        bytes[31] = 0x7f;
        CompressedEdwardsY(bytes)
            .decompress()
            .expect("order-two point decodes")
    }

    #[test]
    fn test_decode_basepoint() {
        let bytes = ED25519_BASEPOINT_POINT.compress().to_bytes();
        let point = PublicPoint::from_bytes(&bytes).expect("valid point");
        assert_eq!(point.to_bytes(), bytes);
        assert!(point.is_torsion_free());
        assert!(!point.is_small_order());
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            PublicPoint::from_bytes(&[0u8; 31]),
            Err(DecodeError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
        assert_eq!(
            PublicPoint::from_bytes(&[]),
            Err(DecodeError::InvalidLength {
                expected: 32,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decode_not_on_curve() {
        // y = 2 has no square root for x.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert_eq!(
            PublicPoint::from_bytes(&bytes),
            Err(DecodeError::NotOnCurve)
        );
    }

    #[test]
    fn test_small_order_points() {
        let two = PublicPoint::from(order_two_point());
        assert!(two.is_small_order());
        assert!(!two.is_torsion_free());

        // y = 0 decodes to a point of order 4.
        let four = PublicPoint::from_bytes(&[0u8; 32]).expect("order-four point decodes");
        assert!(four.is_small_order());
    }

    #[test]
    fn test_clear_cofactor_removes_torsion() {
        let p = EdwardsPoint::mul_base(&Scalar::from(12345u64));
        let mixed = p + order_two_point();
        assert_ne!(mixed, p);
        assert_eq!(clear_cofactor(&mixed), clear_cofactor(&p));
        assert_eq!(
            clear_cofactor(&order_two_point()),
            EdwardsPoint::identity().compress().to_bytes()
        );
    }
}
