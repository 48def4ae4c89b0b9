//! Common types used throughout the Solr client
//!
//! This module contains shared type definitions, type aliases,
//! and the small value types passed into client operations.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A Solr-indexable record. No schema is enforced client-side.
pub type Document = JsonObject;

/// Per-call Solr query parameters (name -> value)
pub type QueryOptions = BTreeMap<String, String>;

// ============================================================================
// Delete Criteria
// ============================================================================

/// Selects the documents removed by a bulk delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteCriteria {
    /// Delete everything matching a Solr query
    Query {
        /// The delete query, e.g. `category:Books`
        q: String,
    },
    /// Delete every document whose `field` equals one of `values`
    FieldValues {
        /// Field to match on
        field: String,
        /// Values to delete
        values: Vec<String>,
    },
}

impl DeleteCriteria {
    /// Criteria matching a Solr query
    pub fn query(q: impl Into<String>) -> Self {
        Self::Query { q: q.into() }
    }

    /// Criteria matching a list of field values
    pub fn field_values<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FieldValues {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse criteria from a loose JSON object.
    ///
    /// Accepts `{"q": "..."}` or `{"field": "...", "values": [...]}`. When both
    /// forms are present the query wins. Scalar values are stringified.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid_criteria("criteria must be a JSON object"))?;

        if let Some(q) = obj.get("q") {
            let q = q
                .as_str()
                .ok_or_else(|| Error::invalid_criteria("'q' must be a string"))?;
            return Ok(Self::query(q));
        }

        match (obj.get("field"), obj.get("values")) {
            (Some(field), Some(values)) => {
                let field = field
                    .as_str()
                    .ok_or_else(|| Error::invalid_criteria("'field' must be a string"))?;
                let values = values
                    .as_array()
                    .ok_or_else(|| Error::invalid_criteria("'values' must be an array"))?
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::field_values(field, values))
            }
            _ => Err(Error::invalid_criteria(
                "expected either 'q' or both 'field' and 'values'",
            )),
        }
    }

    /// Reject criteria that would produce a meaningless delete payload
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Query { q } if q.trim().is_empty() => {
                Err(Error::invalid_criteria("delete query is empty"))
            }
            Self::FieldValues { field, .. } if field.trim().is_empty() => {
                Err(Error::invalid_criteria("delete field is empty"))
            }
            Self::FieldValues { values, .. } if values.is_empty() => {
                Err(Error::invalid_criteria("no values to delete"))
            }
            _ => Ok(()),
        }
    }
}

impl TryFrom<&JsonValue> for DeleteCriteria {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        Self::from_value(value)
    }
}

fn scalar_to_string(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(Error::invalid_criteria(format!(
            "unsupported delete value: {other}"
        ))),
    }
}

// ============================================================================
// Commit Policy
// ============================================================================

/// Commit directive attached to every update request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CommitRepr", into = "String")]
pub enum CommitPolicy {
    /// Hard commit before the request returns (`commit=true`)
    #[default]
    Commit,
    /// Soft commit (`softCommit=true`)
    SoftCommit,
    /// Commit within the given number of milliseconds (`commitWithin=<ms>`)
    Within(u64),
    /// No commit directive; rely on the server's autocommit
    None,
}

impl CommitPolicy {
    /// Query-string pairs for this policy
    pub fn query_params(&self) -> Vec<(String, String)> {
        match self {
            Self::Commit => vec![("commit".to_string(), "true".to_string())],
            Self::SoftCommit => vec![("softCommit".to_string(), "true".to_string())],
            Self::Within(ms) => vec![("commitWithin".to_string(), ms.to_string())],
            Self::None => Vec::new(),
        }
    }
}

impl fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => f.write_str("commit"),
            Self::SoftCommit => f.write_str("soft"),
            Self::Within(ms) => write!(f, "{ms}"),
            Self::None => f.write_str("none"),
        }
    }
}

impl FromStr for CommitPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "commit" | "hard" => Ok(Self::Commit),
            "soft" | "softcommit" | "soft_commit" => Ok(Self::SoftCommit),
            "false" | "none" | "" => Ok(Self::None),
            other => other.parse::<u64>().map(Self::Within).map_err(|_| {
                Error::invalid_config(
                    "commit",
                    format!("expected true, soft, none or milliseconds, got '{s}'"),
                )
            }),
        }
    }
}

impl From<CommitPolicy> for String {
    fn from(policy: CommitPolicy) -> Self {
        policy.to_string()
    }
}

/// Accepted spellings of a commit policy in config files
#[derive(Deserialize)]
#[serde(untagged)]
enum CommitRepr {
    Flag(bool),
    Millis(u64),
    Name(String),
}

impl TryFrom<CommitRepr> for CommitPolicy {
    type Error = Error;

    fn try_from(repr: CommitRepr) -> Result<Self> {
        match repr {
            CommitRepr::Flag(true) => Ok(Self::Commit),
            CommitRepr::Flag(false) => Ok(Self::None),
            CommitRepr::Millis(ms) => Ok(Self::Within(ms)),
            CommitRepr::Name(name) => name.parse(),
        }
    }
}
