//! Party identifiers.
//!
//! An identifier is any stable public label for the accepting party, such as an
//! email address. Both sides must bind the exact same bytes.

use serde::{Deserialize, Serialize};

use crate::{HomqvError, Result};

/// A non-empty, opaque party identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Identifier(Vec<u8>);

impl Identifier {
    /// Create an identifier from raw bytes.
    ///
    /// Fails with [`HomqvError::EmptyIdentifier`] on an empty sequence.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(HomqvError::EmptyIdentifier);
        }
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; identifiers are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for Identifier {
    type Error = HomqvError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = HomqvError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s.as_bytes())
    }
}

impl From<Identifier> for Vec<u8> {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identifier() {
        let id = Identifier::new("alice@example.com").expect("non-empty");
        assert_eq!(id.as_bytes(), b"alice@example.com");
        assert_eq!(id.len(), 17);
        assert!(!id.is_empty());
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert_eq!(Identifier::new(""), Err(HomqvError::EmptyIdentifier));
        assert_eq!(
            Identifier::try_from(Vec::<u8>::new()),
            Err(HomqvError::EmptyIdentifier)
        );
    }

    #[test]
    fn test_opaque_bytes() {
        let id = Identifier::new(vec![0x00u8, 0xff, 0x10]).expect("non-empty");
        assert_eq!(id.as_bytes(), &[0x00u8, 0xff, 0x10][..]);
    }

    #[test]
    fn test_serde_rejects_empty() {
        let id = Identifier::try_from("server-01").expect("non-empty");
        let json = serde_json::to_string(&id).expect("serialize");
        let restored: Identifier = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, restored);

        assert!(serde_json::from_str::<Identifier>("[]").is_err());
    }
}
