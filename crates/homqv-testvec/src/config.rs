//! Configuration for the test vector tool.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "homqv-testvec.toml";

/// Test vector tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestvecConfig {
    /// Where vectors are written and verified.
    #[serde(default = "default_fixtures_path")]
    pub fixtures_path: String,
    /// Iterations per operation in `--bench` mode.
    #[serde(default = "default_bench_iterations")]
    pub bench_iterations: u32,
    /// Log level: "trace" | "debug" | "info" | "warn" | "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_fixtures_path() -> String {
    "tests/fixtures/test_vectors.json".to_string()
}

fn default_bench_iterations() -> u32 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TestvecConfig {
    fn default() -> Self {
        Self {
            fixtures_path: default_fixtures_path(),
            bench_iterations: default_bench_iterations(),
            log_level: default_log_level(),
        }
    }
}

impl TestvecConfig {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`].
    ///
    /// Falls back to defaults if the default file does not exist. An explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The fixtures path as a `Path`.
    pub fn fixtures_path(&self) -> &Path {
        Path::new(&self.fixtures_path)
    }
}
