//! The initiating side of the exchange.
//!
//! ```text
//! Connect(A, id, y):
//!   1. A  = decode(recipient public key)
//!   2. Y  = ephemeral public key, y its scalar
//!   3. e  = bound_exponent(Y, id)
//!   4. t  = b*e + y
//!   5. sigma = [8] * (t * A)
//! ```

use zeroize::Zeroize;

use crate::binding::bound_exponent;
use crate::ephemeral::EphemeralSecret;
use crate::identifier::Identifier;
use crate::point::{self, clear_cofactor};
use crate::scalar::{ScalarDerivation, StaticScalar};
use crate::secret::SharedSecret;
use crate::{seed_from_slice, HomqvError, Result, SEED_SIZE};

/// The party a client connects to: its identifier and static public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    identifier: Identifier,
    public_key: Vec<u8>,
}

impl Recipient {
    /// Create a recipient from its identifier and encoded public key.
    ///
    /// The key is decoded on each [`Client::connect`].
    pub fn new(identifier: Identifier, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier,
            public_key: public_key.into(),
        }
    }

    /// The recipient's identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The recipient's encoded public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

/// The initiating party, holding its long-term scalar `b`.
#[derive(Clone, Debug)]
pub struct Client {
    scalar: StaticScalar,
}

impl Client {
    /// Create a client from an Ed25519 private key seed.
    pub fn new(seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            scalar: StaticScalar::from_seed(seed),
        }
    }

    /// Create a client from a seed slice, checking its length.
    pub fn from_slice(seed: &[u8]) -> Result<Self> {
        let mut seed = seed_from_slice(seed)?;
        let client = Self::new(&seed);
        seed.zeroize();
        Ok(client)
    }

    /// Create a client reusing an Ed25519 signing key.
    pub fn from_signing_key(key: &ed25519_dalek::SigningKey) -> Self {
        let mut seed = key.to_bytes();
        let client = Self::new(&seed);
        seed.zeroize();
        client
    }

    /// Create a client with a custom seed-to-scalar strategy.
    pub fn with_derivation<D: ScalarDerivation>(seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            scalar: StaticScalar::with_derivation::<D>(seed),
        }
    }

    /// Run the exchange against `recipient`, consuming the ephemeral secret.
    ///
    /// The caller sends its static public key and `ephemeral.public_key()` to
    /// the recipient, who completes the exchange with [`Server::accept`].
    ///
    /// [`Server::accept`]: crate::Server::accept
    pub fn connect(&self, recipient: &Recipient, ephemeral: EphemeralSecret) -> Result<SharedSecret> {
        tracing::trace!(
            identifier_len = recipient.identifier.len(),
            "homqv: connect"
        );

        let a = point::decode("recipient", &recipient.public_key)
            .map_err(HomqvError::InvalidPublicKey)?;

        let mut e = bound_exponent(&ephemeral.public_key(), &recipient.identifier);
        let mut t = self.scalar.as_scalar() * &e + ephemeral.scalar();
        let mut result = &t * a.as_edwards();
        let shared = SharedSecret::from_bytes(clear_cofactor(&result));

        e.zeroize();
        t.zeroize();
        result.zeroize();
        Ok(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::tests::order_two_point;
    use crate::point::DecodeError;
    use curve25519_dalek::edwards::CompressedEdwardsY;
    use hex_literal::hex;

    const ALICE_PK: [u8; 32] =
        hex!("8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c");

    fn alice() -> Recipient {
        Recipient::new(
            Identifier::new("alice@example.com").expect("non-empty"),
            ALICE_PK,
        )
    }

    #[test]
    fn test_connect_known_value() {
        let client = Client::new(&[0x02u8; 32]);
        let shared = client
            .connect(&alice(), EphemeralSecret::from_seed([0x03u8; 32]))
            .expect("connect");
        assert_eq!(
            shared.as_bytes(),
            &hex!("e5fe0e1c7a6bd5f439511541cf50a501bd86e926fe976571e99c0fc6861f0237")
        );
    }

    #[test]
    fn test_connect_deterministic() {
        let client = Client::new(&[0x02u8; 32]);
        let s1 = client
            .connect(&alice(), EphemeralSecret::from_seed([0x44u8; 32]))
            .expect("connect");
        let s2 = client
            .connect(&alice(), EphemeralSecret::from_seed([0x44u8; 32]))
            .expect("connect");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_different_ephemerals_differ() {
        let client = Client::new(&[0x02u8; 32]);
        let s1 = client
            .connect(&alice(), EphemeralSecret::random())
            .expect("connect");
        let s2 = client
            .connect(&alice(), EphemeralSecret::random())
            .expect("connect");
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_invalid_recipient_key() {
        let client = Client::new(&[0x02u8; 32]);
        let mut bad = [0u8; 32];
        bad[0] = 2;
        let recipient = Recipient::new(alice().identifier().clone(), bad);
        let err = client
            .connect(&recipient, EphemeralSecret::random())
            .expect_err("not on curve");
        assert_eq!(err, HomqvError::InvalidPublicKey(DecodeError::NotOnCurve));
    }

    #[test]
    fn test_wrong_length_recipient_key() {
        let client = Client::new(&[0x02u8; 32]);
        let recipient = Recipient::new(alice().identifier().clone(), &ALICE_PK[..31]);
        let err = client
            .connect(&recipient, EphemeralSecret::random())
            .expect_err("short key");
        assert_eq!(
            err,
            HomqvError::InvalidPublicKey(DecodeError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_torsion_component_ignored() {
        let client = Client::new(&[0x02u8; 32]);
        let a = CompressedEdwardsY(ALICE_PK).decompress().expect("valid");
        let mixed = (a + order_two_point()).compress().to_bytes();
        let tampered = Recipient::new(alice().identifier().clone(), mixed);

        let s1 = client
            .connect(&alice(), EphemeralSecret::from_seed([0x07u8; 32]))
            .expect("connect");
        let s2 = client
            .connect(&tampered, EphemeralSecret::from_seed([0x07u8; 32]))
            .expect("connect");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_constructors_agree() {
        let seed = [0x21u8; 32];
        let recipient = alice();
        let by_array = Client::new(&seed)
            .connect(&recipient, EphemeralSecret::from_seed([1u8; 32]))
            .expect("connect");
        let by_slice = Client::from_slice(&seed)
            .expect("valid length")
            .connect(&recipient, EphemeralSecret::from_seed([1u8; 32]))
            .expect("connect");
        let by_key = Client::from_signing_key(&ed25519_dalek::SigningKey::from_bytes(&seed))
            .connect(&recipient, EphemeralSecret::from_seed([1u8; 32]))
            .expect("connect");
        assert_eq!(by_array, by_slice);
        assert_eq!(by_array, by_key);
    }

    #[test]
    fn test_from_slice_wrong_length() {
        assert_eq!(
            Client::from_slice(&[0u8; 33]).map(|_| ()),
            Err(HomqvError::InvalidSeedLength {
                expected: 32,
                actual: 33
            })
        );
    }
}
