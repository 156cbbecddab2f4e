use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

/// Config file looked up when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "phishguard.toml";

/// Segmentation word list shipped with the data files
pub const DEFAULT_WORDLIST_PATH: &str = "data/wordninja_words.txt.gz";

/// Prefix of environment overrides, e.g. `PHISHGUARD_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PHISHGUARD";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// Where the HTTP API listens
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Data files loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Word-frequency CSV with a `word` column, most frequent first
    pub corpus_path: PathBuf,

    /// Frequency-ordered word list for segmentation, plain or gzipped
    ///
    /// Defaults to the English list the classifier was trained with. When
    /// `None`, segmentation falls back to the corpus row order.
    #[serde(default)]
    pub wordlist_path: Option<PathBuf>,

    /// Public suffix list in the publicsuffix.org format
    pub suffix_list_path: PathBuf,

    /// Tree-ensemble model exported to JSON
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to timestamped files here instead of stderr
    #[serde(default)]
    pub directory: Option<String>,

    /// Filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl AppConfig {
    /// Layers defaults, an optional TOML file and environment overrides
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("data.corpus_path", "data/unigram_freq.csv")?
            .set_default("data.wordlist_path", DEFAULT_WORDLIST_PATH)?
            .set_default("data.suffix_list_path", "data/public_suffix_list.dat")?
            .set_default("data.model_path", "data/rf_model.json")?
            .set_default("logging.filter", "phishguard=info")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.corpus_path, PathBuf::from("data/unigram_freq.csv"));
        assert_eq!(
            config.data.wordlist_path,
            Some(PathBuf::from(DEFAULT_WORDLIST_PATH))
        );
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
