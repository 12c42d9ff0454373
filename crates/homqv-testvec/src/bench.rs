//! Timing comparison of Connect and Accept against a plain X25519 exchange.

use std::time::{Duration, Instant};

use homqv::{Client, EphemeralSecret, Identifier, Recipient, Sender, Server};
use x25519_dalek::{PublicKey, StaticSecret};

/// Average time per operation.
#[derive(Debug, Clone, Copy)]
pub struct BenchResult {
    pub connect: Duration,
    pub accept: Duration,
    pub ecdh: Duration,
}

fn per_op(total: Duration, iterations: u32) -> Duration {
    total / iterations.max(1)
}

/// Run each operation `iterations` times.
///
/// Connect includes building its ephemeral secret from a seed, since a
/// secret is consumed by each exchange.
pub fn run(iterations: u32) -> anyhow::Result<BenchResult> {
    let id = Identifier::new("alice@example.com")?;
    let a = ed25519_dalek::SigningKey::from_bytes(&[0x01; 32]);
    let b = ed25519_dalek::SigningKey::from_bytes(&[0x02; 32]);

    let client = Client::from_signing_key(&b);
    let recipient = Recipient::new(id.clone(), a.verifying_key().to_bytes());
    let server = Server::from_signing_key(id, &a);
    let sender = Sender::new(b.verifying_key().to_bytes());
    let nonce = EphemeralSecret::from_seed([0x03; 32]).public_key();

    let start = Instant::now();
    for _ in 0..iterations {
        client.connect(&recipient, EphemeralSecret::from_seed([0x03; 32]))?;
    }
    let connect = per_op(start.elapsed(), iterations);

    let start = Instant::now();
    for _ in 0..iterations {
        server.accept(&sender, &nonce)?;
    }
    let accept = per_op(start.elapsed(), iterations);

    let sk_a = StaticSecret::from([0x04; 32]);
    let sk_b = StaticSecret::from([0x05; 32]);
    let pk_a = PublicKey::from(&sk_a);
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = sk_b.diffie_hellman(&pk_a);
    }
    let ecdh = per_op(start.elapsed(), iterations);

    tracing::info!(
        iterations,
        connect_ns = connect.as_nanos() as u64,
        accept_ns = accept.as_nanos() as u64,
        ecdh_ns = ecdh.as_nanos() as u64,
        "benchmark complete"
    );

    Ok(BenchResult {
        connect,
        accept,
        ecdh,
    })
}
