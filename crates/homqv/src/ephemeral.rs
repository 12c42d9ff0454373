//! Single-use ephemeral secrets.
//!
//! An [`EphemeralSecret`] is consumed by [`Client::connect`](crate::Client::connect)
//! and is not `Clone`, so one ephemeral key cannot back two exchanges.

use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::scalar::derive_scalar;
use crate::{seed_from_slice, Result, PUBLIC_KEY_SIZE, SEED_SIZE};

/// A one-time private key for a single exchange.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EphemeralSecret {
    scalar: Scalar,
    #[zeroize(skip)]
    public: [u8; PUBLIC_KEY_SIZE],
}

impl EphemeralSecret {
    /// Build from an Ed25519 private key seed.
    pub fn from_seed(seed: [u8; SEED_SIZE]) -> Self {
        let mut seed = seed;
        let public = ed25519_dalek::SigningKey::from_bytes(&seed)
            .verifying_key()
            .to_bytes();
        let scalar = derive_scalar(&seed);
        seed.zeroize();
        Self { scalar, public }
    }

    /// Build from a seed slice, checking its length.
    pub fn from_slice(seed: &[u8]) -> Result<Self> {
        Ok(Self::from_seed(seed_from_slice(seed)?))
    }

    /// Generate a fresh ephemeral secret from a random source.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut seed = [0u8; SEED_SIZE];
        rng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Generate a fresh ephemeral secret from the OS random number generator.
    pub fn random() -> Self {
        Self::generate(&mut rand::rngs::OsRng)
    }

    /// The public value `Y` to send to the server.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.public
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl std::fmt::Debug for EphemeralSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralSecret")
            .field("public", &hex::encode(self.public))
            .finish()
    }
}
