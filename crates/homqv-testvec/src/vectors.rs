//! Known-answer vectors for scalar derivation and key agreement.
//!
//! Every vector stores its inputs as strings; outputs are recomputed from those
//! inputs during verification, so a fixture file is checked against the library
//! rather than against itself.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context};
use homqv::binding::bound_exponent;
use homqv::scalar::derive_scalar;
use homqv::{Client, EphemeralSecret, Identifier, Recipient, Sender, Server, SEED_SIZE};
use serde::{Deserialize, Serialize};

const AGREEMENT_PREFIX: &str = "agreement_";
const SCALAR_PREFIX: &str = "scalar_derivation_";

/// A versioned collection of named vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVectors {
    pub version: String,
    pub generated_by: String,
    pub vectors: BTreeMap<String, TestVector>,
}

/// One named vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub inputs: BTreeMap<String, String>,
    pub outputs: BTreeMap<String, String>,
}

fn input<'a>(inputs: &'a BTreeMap<String, String>, key: &str) -> anyhow::Result<&'a str> {
    inputs
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing input {key}"))
}

fn seed_input(inputs: &BTreeMap<String, String>, key: &str) -> anyhow::Result<[u8; SEED_SIZE]> {
    let mut seed = [0u8; SEED_SIZE];
    hex::decode_to_slice(input(inputs, key)?, &mut seed)
        .with_context(|| format!("input {key} is not a 32-byte hex seed"))?;
    Ok(seed)
}

fn public_key(seed: &[u8; SEED_SIZE]) -> [u8; 32] {
    ed25519_dalek::SigningKey::from_bytes(seed)
        .verifying_key()
        .to_bytes()
}

/// Compute the outputs of an agreement vector from its inputs.
///
/// Fails if the two sides do not agree.
pub fn agreement_outputs(
    inputs: &BTreeMap<String, String>,
) -> anyhow::Result<BTreeMap<String, String>> {
    let identifier = Identifier::new(input(inputs, "identifier")?)?;
    let server_seed = seed_input(inputs, "server_seed")?;
    let client_seed = seed_input(inputs, "client_seed")?;
    let ephemeral_seed = seed_input(inputs, "ephemeral_seed")?;

    let server_pk = public_key(&server_seed);
    let client_pk = public_key(&client_seed);
    let ephemeral = EphemeralSecret::from_seed(ephemeral_seed);
    let nonce = ephemeral.public_key();
    let e = bound_exponent(&nonce, &identifier);

    let from_client = Client::new(&client_seed)
        .connect(&Recipient::new(identifier.clone(), server_pk), ephemeral)?;
    let from_server = Server::new(identifier, &server_seed).accept(&Sender::new(client_pk), &nonce)?;
    if from_client != from_server {
        bail!("connect and accept disagree");
    }

    Ok(BTreeMap::from([
        ("bound_exponent".to_string(), hex::encode(e.to_bytes())),
        ("client_public_key".to_string(), hex::encode(client_pk)),
        ("ephemeral_public_key".to_string(), hex::encode(nonce)),
        ("server_public_key".to_string(), hex::encode(server_pk)),
        ("shared_secret".to_string(), from_client.to_hex()),
    ]))
}

/// Compute the outputs of a scalar derivation vector from its inputs.
pub fn scalar_outputs(
    inputs: &BTreeMap<String, String>,
) -> anyhow::Result<BTreeMap<String, String>> {
    let seed = seed_input(inputs, "seed")?;
    Ok(BTreeMap::from([
        ("public_key".to_string(), hex::encode(public_key(&seed))),
        (
            "scalar".to_string(),
            hex::encode(derive_scalar(&seed).to_bytes()),
        ),
    ]))
}

fn outputs_for(name: &str, inputs: &BTreeMap<String, String>) -> anyhow::Result<BTreeMap<String, String>> {
    if name.starts_with(AGREEMENT_PREFIX) {
        agreement_outputs(inputs)
    } else if name.starts_with(SCALAR_PREFIX) {
        scalar_outputs(inputs)
    } else {
        bail!("unknown vector kind: {name}")
    }
}

fn agreement_vector(
    description: &str,
    identifier: &str,
    server_seed: [u8; 32],
    client_seed: [u8; 32],
    ephemeral_seed: [u8; 32],
) -> anyhow::Result<TestVector> {
    let inputs = BTreeMap::from([
        ("client_seed".to_string(), hex::encode(client_seed)),
        ("ephemeral_seed".to_string(), hex::encode(ephemeral_seed)),
        ("identifier".to_string(), identifier.to_string()),
        ("server_seed".to_string(), hex::encode(server_seed)),
    ]);
    let outputs = agreement_outputs(&inputs)?;
    Ok(TestVector {
        description: description.to_string(),
        inputs,
        outputs,
    })
}

fn scalar_vector(seed: [u8; 32]) -> anyhow::Result<TestVector> {
    let inputs = BTreeMap::from([("seed".to_string(), hex::encode(seed))]);
    let outputs = scalar_outputs(&inputs)?;
    Ok(TestVector {
        description: "clamp(SHA-512(seed)[..32]) mod l".to_string(),
        inputs,
        outputs,
    })
}

// RFC 8032 Section 7.1, tests 1-3.
const RFC8032_SECRET_1: [u8; 32] = [
    0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c, 0xc4,
    0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
];
const RFC8032_SECRET_2: [u8; 32] = [
    0x4c, 0xcd, 0x08, 0x9b, 0x28, 0xff, 0x96, 0xda, 0x9d, 0xb6, 0xc3, 0x46, 0xec, 0x11, 0x4e, 0x0f,
    0x5b, 0x8a, 0x31, 0x9f, 0x35, 0xab, 0xa6, 0x24, 0xda, 0x8c, 0xf6, 0xed, 0x4f, 0xb8, 0xa6, 0xfb,
];
const RFC8032_SECRET_3: [u8; 32] = [
    0xc5, 0xaa, 0x8d, 0xf4, 0x3f, 0x9f, 0x83, 0x7b, 0xed, 0xb7, 0x44, 0x2f, 0x31, 0xdc, 0xb7, 0xb1,
    0x66, 0xd3, 0x85, 0x35, 0x07, 0x6f, 0x09, 0x4b, 0x85, 0xce, 0x3a, 0x2e, 0x0b, 0x44, 0x58, 0xf7,
];

/// Generate the full vector set.
pub fn generate_all_vectors() -> anyhow::Result<TestVectors> {
    let mut vectors = BTreeMap::new();

    vectors.insert(
        "agreement_basic".to_string(),
        agreement_vector(
            "Connect/Accept with constant seeds 0x01 (server), 0x02 (client), 0x03 (ephemeral)",
            "alice@example.com",
            [0x01; 32],
            [0x02; 32],
            [0x03; 32],
        )?,
    );
    vectors.insert(
        "agreement_edge_seeds".to_string(),
        agreement_vector(
            "Connect/Accept with all-zero server seed and all-ones client seed",
            "server-01",
            [0x00; 32],
            [0xff; 32],
            [0x42; 32],
        )?,
    );
    vectors.insert(
        "agreement_rfc8032_seeds".to_string(),
        agreement_vector(
            "Connect/Accept with the RFC 8032 Section 7.1 test 1-3 secret keys",
            "bob@example.org",
            RFC8032_SECRET_1,
            RFC8032_SECRET_2,
            RFC8032_SECRET_3,
        )?,
    );
    vectors.insert(
        "scalar_derivation_rfc8032_test1".to_string(),
        scalar_vector(RFC8032_SECRET_1)?,
    );
    vectors.insert("scalar_derivation_zero".to_string(), scalar_vector([0x00; 32])?);

    Ok(TestVectors {
        version: "1".to_string(),
        generated_by: "homqv-testvec".to_string(),
        vectors,
    })
}

/// Recompute every vector's outputs from its inputs and compare.
///
/// Returns the names of the vectors that failed.
pub fn verify_vectors(vectors: &TestVectors) -> Vec<String> {
    let mut failed = Vec::new();
    for (name, vector) in &vectors.vectors {
        match outputs_for(name, &vector.inputs) {
            Ok(outputs) if outputs == vector.outputs => {
                tracing::debug!(name, "vector verified");
            }
            Ok(_) => {
                tracing::error!(name, "vector outputs mismatch");
                failed.push(name.clone());
            }
            Err(e) => {
                tracing::error!(name, error = %e, "vector could not be evaluated");
                failed.push(name.clone());
            }
        }
    }
    failed
}
