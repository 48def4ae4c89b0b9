//! Client configuration
//!
//! A [`SolrConfig`] is fixed when the client is constructed. It can be built
//! explicitly, read from the `SOLR_*` environment variables, or loaded from a
//! YAML/JSON file. Query parameter precedence at search time is:
//! call-site options > `default_params` > built-in (`q`, `wt=json`).

use crate::error::{Error, Result};
use crate::types::{CommitPolicy, JsonObject, JsonValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the Solr base URI
pub const ENV_BASE_URI: &str = "SOLR_BASE_URI";
/// Environment variable holding the default collection (core) name
pub const ENV_DEFAULT_COLLECTION: &str = "SOLR_DEFAULT_COLLECTION";
/// Environment variable holding the default params as a JSON object
pub const ENV_DEFAULT_PARAMS: &str = "SOLR_DEFAULT_PARAMS";
/// Environment variable holding the commit policy
pub const ENV_COMMIT: &str = "SOLR_COMMIT";

/// Default params used when `SOLR_DEFAULT_PARAMS` is unset
pub const BUILTIN_DEFAULT_PARAMS: &str = r#"{"defType":"edismax","sort":"score desc"}"#;

// ============================================================================
// SolrConfig
// ============================================================================

/// Connection and request defaults for a [`crate::SolrClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrConfig {
    /// Base URI of the Solr server, e.g. `http://localhost:8983/solr`
    pub base_uri: String,

    /// Collection (core) path segment used for every request
    #[serde(default)]
    pub default_collection: String,

    /// Parameters merged into every search, below call-site options
    #[serde(default = "builtin_params", deserialize_with = "deserialize_params")]
    pub default_params: BTreeMap<String, String>,

    /// Commit directive sent with every update
    #[serde(default)]
    pub commit: CommitPolicy,

    /// Request timeout in milliseconds (unset = HTTP library default)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Extra headers sent with every request, e.g. `Authorization`
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn builtin_params() -> BTreeMap<String, String> {
    parse_params_json(BUILTIN_DEFAULT_PARAMS).unwrap_or_default()
}

fn default_user_agent() -> String {
    format!("solr-client/{}", env!("CARGO_PKG_VERSION"))
}

fn deserialize_params<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let obj = JsonObject::deserialize(deserializer)?;
    params_from_object(obj).map_err(serde::de::Error::custom)
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            default_collection: String::new(),
            default_params: builtin_params(),
            commit: CommitPolicy::default(),
            timeout_ms: None,
            headers: BTreeMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl SolrConfig {
    /// Create a new config builder
    pub fn builder() -> SolrConfigBuilder {
        SolrConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset base URI and collection become empty strings; an unset
    /// `SOLR_DEFAULT_PARAMS` falls back to [`BUILTIN_DEFAULT_PARAMS`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            base_uri: lookup(ENV_BASE_URI).unwrap_or_default(),
            default_collection: lookup(ENV_DEFAULT_COLLECTION).unwrap_or_default(),
            ..Self::default()
        };

        if let Some(raw) = lookup(ENV_DEFAULT_PARAMS) {
            config.default_params = parse_params_json(&raw)
                .map_err(|e| Error::invalid_config(ENV_DEFAULT_PARAMS, e.to_string()))?;
        }

        if let Some(raw) = lookup(ENV_COMMIT) {
            config.commit = raw.parse()?;
        }

        Ok(config)
    }

    /// Load configuration from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML (or JSON) string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Request timeout, if one was configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check the config is usable for issuing requests
    pub fn validate(&self) -> Result<()> {
        if self.base_uri.trim().is_empty() {
            return Err(Error::invalid_config("base_uri", "must not be empty"));
        }
        let url = url::Url::parse(&self.base_uri)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_uri",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`SolrConfig`]
#[derive(Default)]
pub struct SolrConfigBuilder {
    config: SolrConfig,
}

impl SolrConfigBuilder {
    /// Set the base URI
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.base_uri = uri.into();
        self
    }

    /// Set the default collection
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.config.default_collection = collection.into();
        self
    }

    /// Add or replace a single default parameter
    #[must_use]
    pub fn default_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_params.insert(key.into(), value.into());
        self
    }

    /// Replace all default parameters
    #[must_use]
    pub fn default_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.config.default_params = params;
        self
    }

    /// Set the commit policy for updates
    #[must_use]
    pub fn commit(mut self, policy: CommitPolicy) -> Self {
        self.config.commit = policy;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SolrConfig {
        self.config
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse a JSON object of default params, stringifying scalar values
pub fn parse_params_json(raw: &str) -> Result<BTreeMap<String, String>> {
    let obj: JsonObject = serde_json::from_str(raw)?;
    params_from_object(obj)
}

fn params_from_object(obj: JsonObject) -> Result<BTreeMap<String, String>> {
    obj.into_iter()
        .map(|(key, value)| {
            let value = match value {
                JsonValue::String(s) => s,
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                other => {
                    return Err(Error::invalid_config(
                        key,
                        format!("default param must be a scalar, got {other}"),
                    ))
                }
            };
            Ok((key, value))
        })
        .collect()
}
