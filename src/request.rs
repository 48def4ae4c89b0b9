//! Request construction
//!
//! Pure functions that turn client calls into Solr parameters and update
//! bodies. Nothing here touches the network.

use crate::error::Result;
use crate::types::{DeleteCriteria, Document, JsonValue, QueryOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeMap;

/// Output format directive sent with every search
pub const OUTPUT_FORMAT: &str = "json";

/// Row cap for the uniqueness check; two hits are enough to prove a duplicate
pub const UNIQUENESS_CHECK_ROWS: u32 = 2;

static QUERY_SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[+\-&|!(){}\[\]^"~*?:\\/\s]"#).expect("static regex is valid")
});

/// Build the final parameter map for a `select` request.
///
/// Later layers win on key collision: built-ins (`q`, `wt`) < `defaults` < `options`.
pub fn search_params(
    query: &str,
    defaults: &BTreeMap<String, String>,
    options: &QueryOptions,
) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("q".to_string(), query.to_string());
    params.insert("wt".to_string(), OUTPUT_FORMAT.to_string());
    params.extend(defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
    params.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

/// Body for adding a single document
pub fn add_payload(document: &Document) -> JsonValue {
    json!([document])
}

/// Body for adding many documents in one request
pub fn bulk_add_payload(documents: &[Document]) -> JsonValue {
    json!(documents)
}

/// Body for a bulk delete
pub fn delete_payload(criteria: &DeleteCriteria) -> Result<JsonValue> {
    criteria.validate()?;
    let payload = match criteria {
        DeleteCriteria::Query { q } => json!({ "delete": { "query": q } }),
        DeleteCriteria::FieldValues { field, values } => {
            let entries: Vec<JsonValue> = values
                .iter()
                .map(|value| json!({ field.as_str(): value }))
                .collect();
            json!({ "delete": entries })
        }
    };
    Ok(payload)
}

/// Body for deleting the single document whose `field` equals `value`
pub fn single_delete_payload(field: &str, value: &str) -> JsonValue {
    json!({ "delete": { field: value } })
}

/// Search options that count how many documents carry `field:value`.
///
/// Grouping is switched off and `wt` pinned to JSON so that tenant defaults
/// cannot reshape the response and hide `response.numFound`.
pub fn uniqueness_check_options(field: &str, value: &str) -> QueryOptions {
    let mut options = QueryOptions::new();
    options.insert(
        "fq".to_string(),
        format!("{field}:{}", escape_query_value(value)),
    );
    options.insert("group".to_string(), "false".to_string());
    options.insert("rows".to_string(), UNIQUENESS_CHECK_ROWS.to_string());
    options.insert("wt".to_string(), OUTPUT_FORMAT.to_string());
    options
}

/// Backslash-escape characters with meaning in the Solr query parser
pub fn escape_query_value(value: &str) -> String {
    QUERY_SPECIAL_CHARS.replace_all(value, r"\$0").into_owned()
}
