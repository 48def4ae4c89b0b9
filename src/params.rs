//! Allow-list of recognised Solr query parameters
//!
//! Options passed to [`crate::SolrClient::search`] are checked against this
//! list so that a typo such as `rowz` fails fast instead of being silently
//! ignored by Solr. Only names are checked; values pass through untouched.

use crate::error::{Error, Result};
use crate::types::QueryOptions;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Parameter names accepted by `search`
pub const VALID_PARAMS: &[&str] = &[
    // Common query parameters
    "q",
    "fq",
    "sort",
    "rows",
    "start",
    "fl",
    "df",
    "defType",
    "q.op",
    "wt",
    "timeAllowed",
    "cursorMark",
    "omitHeader",
    "echoParams",
    "debug",
    "debugQuery",
    "explainOther",
    // DisMax / eDisMax
    "dismax",
    "qf",
    "pf",
    "mm",
    "bq",
    "bf",
    "boost",
    "tie",
    // Faceting
    "facet",
    "facet.field",
    "facet.query",
    "facet.limit",
    "facet.mincount",
    "facet.sort",
    "facet.prefix",
    "facet.pivot",
    "facet.range",
    "json.facet",
    // Highlighting
    "hl",
    "hl.fl",
    "hl.snippets",
    "hl.fragsize",
    "hl.simple.pre",
    "hl.simple.post",
    // Spellcheck
    "spellcheck",
    "spellcheck.q",
    "spellcheck.count",
    "spellcheck.collate",
    // Grouping
    "group",
    "group.field",
    "group.limit",
    "group.sort",
    "group.main",
    // Spatial
    "spatial",
    "sfield",
    "pt",
    "d",
    // Stats and terms
    "stats",
    "stats.field",
    "terms",
    "terms.fl",
    // Streaming expressions
    "expr",
    // Update directives
    "commit",
    "commitWithin",
    "softCommit",
];

static VALID_PARAM_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| VALID_PARAMS.iter().copied().collect());

/// Check whether a single parameter name is on the allow-list
pub fn is_valid_param(name: &str) -> bool {
    VALID_PARAM_SET.contains(name)
}

/// All accepted parameter names, in declaration order
pub fn valid_params() -> &'static [&'static str] {
    VALID_PARAMS
}

/// Fail with [`Error::InvalidParameter`] on the first unknown option name
pub fn validate_params(options: &QueryOptions) -> Result<()> {
    match options.keys().find(|key| !is_valid_param(key)) {
        Some(key) => Err(Error::invalid_param(key.as_str())),
        None => Ok(()),
    }
}
