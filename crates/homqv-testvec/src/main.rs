//! Test vector generator for the homqv key agreement.
//!
//! Generates `test_vectors.json` with deterministic known-answer vectors for
//! scalar derivation and both sides of the exchange.
//!
//! Usage:
//!   homqv-testvec                      # Generate test_vectors.json
//!   homqv-testvec --verify             # Verify test vectors match the library
//!   homqv-testvec --bench              # Time Connect/Accept against X25519
//!   homqv-testvec --config <path>      # Use a specific TOML config file

mod bench;
mod config;
mod vectors;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{error, info};

use crate::config::TestvecConfig;
use crate::vectors::TestVectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Generate,
    Verify,
    Bench,
}

struct Args {
    mode: Mode,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut mode = Mode::Generate;
    let mut config = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verify" => mode = Mode::Verify,
            "--bench" => mode = Mode::Bench,
            "--config" => {
                let path = iter.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Args { mode, config })
}

fn write_vectors(path: &Path, vectors: &TestVectors) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(vectors)?;
    std::fs::write(path, json + "\n").with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn self_verify(vectors: &TestVectors) -> anyhow::Result<()> {
    let failed = vectors::verify_vectors(vectors);
    if failed.is_empty() {
        info!("Self-verification passed.");
        Ok(())
    } else {
        bail!("verification failed for: {}", failed.join(", "))
    }
}

fn generate(config: &TestvecConfig) -> anyhow::Result<()> {
    let vectors = vectors::generate_all_vectors()?;
    let path = config.fixtures_path();
    write_vectors(path, &vectors)?;
    info!(
        count = vectors.vectors.len(),
        path = %path.display(),
        "generated test vectors"
    );
    self_verify(&vectors)
}

fn verify(config: &TestvecConfig) -> anyhow::Result<()> {
    let path = config.fixtures_path();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let vectors: TestVectors = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            self_verify(&vectors)?;
            info!(count = vectors.vectors.len(), "All test vectors verified successfully.");
            Ok(())
        }
        Err(_) => {
            info!(path = %path.display(), "No existing test vectors found. Generating...");
            generate(config)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;
    let config = TestvecConfig::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("homqv={}", config.log_level).parse()?)
                .add_directive(format!("homqv_testvec={}", config.log_level).parse()?),
        )
        .init();

    let result = match args.mode {
        Mode::Generate => generate(&config),
        Mode::Verify => verify(&config),
        Mode::Bench => bench::run(config.bench_iterations).map(|r| {
            println!("connect: {:?}/op", r.connect);
            println!("accept:  {:?}/op", r.accept);
            println!("x25519:  {:?}/op", r.ecdh);
        }),
    };
    if let Err(e) = &result {
        error!(error = %e, "homqv-testvec failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(rest: &[&str]) -> Vec<String> {
        std::iter::once("homqv-testvec")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_default_mode() {
        let args = parse_args(&argv(&[])).expect("parse");
        assert_eq!(args.mode, Mode::Generate);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_verify_with_config() {
        let args = parse_args(&argv(&["--verify", "--config", "custom.toml"])).expect("parse");
        assert_eq!(args.mode, Mode::Verify);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&argv(&["--config"])).is_err());
        assert!(parse_args(&argv(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_write_and_verify_roundtrip() {
        let dir = std::env::temp_dir().join(format!("homqv-testvec-{}", std::process::id()));
        let path = dir.join("vectors.json");
        let config = TestvecConfig {
            fixtures_path: path.display().to_string(),
            ..TestvecConfig::default()
        };
        generate(&config).expect("generate");
        verify(&config).expect("verify");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
