//! The accepting side of the exchange.
//!
//! ```text
//! Accept(B, Y):
//!   1. B, Y = decode(sender public key), decode(sender ephemeral key)
//!   2. e  = bound_exponent(Y as received, own id)
//!   3. sigma = [8] * (a * (e*B + Y))
//! ```
//!
//! The server binds its *own* identifier. A client that connected with any
//! other identifier computes a different exponent and the secrets disagree;
//! this is what authenticates the server to the client.

use zeroize::Zeroize;

use crate::binding::bound_exponent;
use crate::identifier::Identifier;
use crate::point::{self, clear_cofactor};
use crate::scalar::{ScalarDerivation, StaticScalar};
use crate::secret::SharedSecret;
use crate::{seed_from_slice, HomqvError, Result, SEED_SIZE};

/// The party that initiated the exchange, as seen by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    public_key: Vec<u8>,
}

impl Sender {
    /// Create a sender from its encoded static public key.
    pub fn new(public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    /// The sender's encoded public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

/// The accepting party, holding its identifier and long-term scalar `a`.
#[derive(Clone, Debug)]
pub struct Server {
    identifier: Identifier,
    scalar: StaticScalar,
}

impl Server {
    /// Create a server from its identifier and an Ed25519 private key seed.
    pub fn new(identifier: Identifier, seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            identifier,
            scalar: StaticScalar::from_seed(seed),
        }
    }

    /// Create a server from a seed slice, checking its length.
    pub fn from_slice(identifier: Identifier, seed: &[u8]) -> Result<Self> {
        let mut seed = seed_from_slice(seed)?;
        let server = Self::new(identifier, &seed);
        seed.zeroize();
        Ok(server)
    }

    /// Create a server reusing an Ed25519 signing key.
    pub fn from_signing_key(identifier: Identifier, key: &ed25519_dalek::SigningKey) -> Self {
        let mut seed = key.to_bytes();
        let server = Self::new(identifier, &seed);
        seed.zeroize();
        server
    }

    /// Create a server with a custom seed-to-scalar strategy.
    pub fn with_derivation<D: ScalarDerivation>(
        identifier: Identifier,
        seed: &[u8; SEED_SIZE],
    ) -> Self {
        Self {
            identifier,
            scalar: StaticScalar::with_derivation::<D>(seed),
        }
    }

    /// The identifier clients must connect with.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Complete an exchange from the sender's static key and ephemeral public value.
    pub fn accept(&self, sender: &Sender, nonce: &[u8]) -> Result<SharedSecret> {
        tracing::trace!(identifier_len = self.identifier.len(), "homqv: accept");

        let b = point::decode("sender", &sender.public_key)
            .map_err(HomqvError::InvalidSenderKey)?;
        let y = point::decode("sender_nonce", nonce).map_err(HomqvError::InvalidSenderNonce)?;

        let mut e = bound_exponent(nonce, &self.identifier);
        let combined = &e * b.as_edwards() + y.as_edwards();
        let mut result = self.scalar.as_scalar() * &combined;
        let shared = SharedSecret::from_bytes(clear_cofactor(&result));

        e.zeroize();
        result.zeroize();
        Ok(shared)
    }
}
