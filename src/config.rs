//! Configuration for kbom-query.
//!
//! The bucket comes from the `S3_BUCKET` environment variable with a built-in
//! default; the object key is fixed. An optional YAML file
//! (`kbom-query.config.yml`) selects the storage backend. By default reads
//! go to Amazon S3 with signed requests.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::network::HttpObjectStore;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "kbom-query.config.yml";

/// Environment variable selecting the bucket
pub const BUCKET_ENV_VAR: &str = "S3_BUCKET";

pub const DEFAULT_BUCKET: &str = "test-kbom-reports-bucket-7feb2025";

/// Key of the report object within the bucket
pub const REPORT_KEY: &str = "k8s_bom.json";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub local_dir: Option<PathBuf>,
    /// Send plain unsigned GETs to `endpoint` instead of signed S3 requests
    pub unsigned: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Where the report lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    /// The report object in `bucket`
    pub fn report_in(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: REPORT_KEY.to_string(),
        }
    }
}

/// Which object store backend serves reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Signed S3 requests, optionally against an S3-compatible endpoint
    S3 { endpoint: Option<String> },
    /// Unsigned path-style GETs
    Http { endpoint: String },
    Local { root: PathBuf },
}

impl StoreConfig {
    fn remote(endpoint: Option<String>, unsigned: bool) -> Self {
        if unsigned {
            StoreConfig::Http {
                endpoint: endpoint
                    .unwrap_or_else(|| HttpObjectStore::DEFAULT_ENDPOINT.to_string()),
            }
        } else {
            StoreConfig::S3 { endpoint }
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::S3 { endpoint: None }
    }
}

/// Command-line overrides, taking precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub local_dir: Option<PathBuf>,
    pub unsigned: bool,
}

/// Fully resolved configuration for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub location: ObjectLocation,
    pub store: StoreConfig,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            location: ObjectLocation::report_in(DEFAULT_BUCKET),
            store: StoreConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Resolves configuration, reading the bucket from `S3_BUCKET`
    pub fn from_env(file: Option<ConfigFile>, overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve(file, overrides, std::env::var(BUCKET_ENV_VAR).ok())
    }

    /// Resolves configuration from explicit sources
    ///
    /// Bucket precedence: `bucket_env` (if non-empty) > config file > default.
    /// Store precedence: command-line overrides > config file > signed S3.
    pub fn resolve(
        file: Option<ConfigFile>,
        overrides: ConfigOverrides,
        bucket_env: Option<String>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let bucket = resolve_bucket(bucket_env, file.bucket);
        let unsigned = overrides.unsigned || file.unsigned.unwrap_or(false);

        let store = match (overrides.local_dir, overrides.endpoint) {
            (Some(root), _) => StoreConfig::Local { root },
            (None, Some(endpoint)) => {
                validate_endpoint(&endpoint)?;
                StoreConfig::remote(Some(endpoint), unsigned)
            }
            (None, None) => match (file.local_dir, file.endpoint) {
                (Some(root), None) => StoreConfig::Local { root },
                (None, endpoint) => StoreConfig::remote(endpoint, unsigned),
                (Some(_), Some(_)) => bail!(
                    "Invalid config: 'endpoint' and 'local_dir' are mutually exclusive.\n\n\
                     💡 Hint: Configure either an object store endpoint or a local directory."
                ),
            },
        };

        Ok(Self {
            location: ObjectLocation::report_in(bucket),
            store,
        })
    }
}

/// Picks the bucket name: environment first, then config file, then default
pub fn resolve_bucket(env_value: Option<String>, file_value: Option<String>) -> String {
    env_value
        .filter(|bucket| !bucket.trim().is_empty())
        .or(file_value)
        .unwrap_or_else(|| DEFAULT_BUCKET.to_string())
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref bucket) = config.bucket {
        if bucket.trim().is_empty() {
            bail!(
                "Invalid config: bucket must not be empty.\n\n\
                 💡 Hint: Remove the 'bucket' field to use the {} environment variable or the default bucket.",
                BUCKET_ENV_VAR
            );
        }
    }

    if let Some(ref endpoint) = config.endpoint {
        validate_endpoint(endpoint)?;
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        bail!(
            "Invalid endpoint: {}\n\n💡 Hint: The endpoint must be an http:// or https:// URL (e.g., \"{}\").",
            endpoint,
            HttpObjectStore::DEFAULT_ENDPOINT
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}
