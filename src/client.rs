//! Solr client
//!
//! [`SolrClient`] is the public face of the crate. Each method is a single
//! request/response round trip against the configured collection:
//!
//! | Method                     | Handler   | HTTP |
//! |----------------------------|-----------|------|
//! | `search`                   | `/select` | GET  |
//! | `add_document`             | `/update` | POST |
//! | `bulk_add_documents`       | `/update` | POST |
//! | `bulk_delete_documents`    | `/update` | POST |
//! | `delete_single_document`   | `/select` then `/update` | GET + POST |
//!
//! The client holds no mutable state. Build one and share it by reference
//! (or `Arc`) with whatever needs it.

use crate::config::SolrConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::params::validate_params;
use crate::request;
use crate::types::{DeleteCriteria, Document, JsonValue, QueryOptions};
use tracing::{debug, info, warn};

/// Request handler for queries
pub const SELECT_HANDLER: &str = "select";

/// Request handler for updates (add/delete)
pub const UPDATE_HANDLER: &str = "update";

/// Field used by `delete_single_document` when none is given
pub const DEFAULT_ID_FIELD: &str = "id";

/// Client for a single Solr collection
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: HttpClient,
    config: SolrConfig,
}

impl SolrClient {
    /// Create a client from an explicit configuration
    pub fn new(config: SolrConfig) -> Result<Self> {
        config.validate()?;

        let mut http_config = HttpClientConfig::builder()
            .base_url(config.base_uri.clone())
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            http_config = http_config.timeout(timeout);
        }
        for (key, value) in &config.headers {
            http_config = http_config.header(key.clone(), value.clone());
        }
        let http = HttpClient::with_config(http_config.build())?;

        info!(
            base_uri = %config.base_uri,
            collection = %config.default_collection,
            "Created Solr client"
        );

        Ok(Self { http, config })
    }

    /// Create a client from the `SOLR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SolrConfig::from_env()?)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    /// Add one document and commit according to the configured policy
    pub async fn add_document(&self, document: &Document) -> Result<JsonValue> {
        debug!("Adding 1 document");
        self.update(request::add_payload(document)).await
    }

    /// Add many documents in a single request
    pub async fn bulk_add_documents(&self, documents: &[Document]) -> Result<JsonValue> {
        debug!("Adding {} documents", documents.len());
        self.update(request::bulk_add_payload(documents)).await
    }

    /// Delete every document matching `criteria` in a single request
    pub async fn bulk_delete_documents(&self, criteria: &DeleteCriteria) -> Result<JsonValue> {
        let payload = request::delete_payload(criteria)?;
        debug!("Bulk delete: {}", payload);
        self.update(payload).await
    }

    /// Delete the one document whose `field` equals `value`.
    ///
    /// A counting search runs first. If more than one document matches,
    /// nothing is deleted and [`Error::NonUniqueValue`] is returned. A count
    /// that cannot be read from the response is an [`Error::Decode`], also
    /// without a delete. Use [`DEFAULT_ID_FIELD`] to delete by primary key.
    pub async fn delete_single_document(&self, value: &str, field: &str) -> Result<JsonValue> {
        let options = request::uniqueness_check_options(field, value);
        let found = num_found(&self.search("*:*", &options).await?)?;

        if found > 1 {
            warn!(
                field = %field,
                value = %value,
                found,
                "Refusing to delete non-unique value"
            );
            return Err(Error::non_unique(field, value, found));
        }
        if found == 0 {
            debug!("No document has {}={}, sending delete anyway", field, value);
        }

        self.update(request::single_delete_payload(field, value))
            .await
    }

    /// Run a query against the `select` handler.
    ///
    /// `options` must only use allow-listed parameter names; the check runs
    /// before any request is sent. Returns the decoded response unchanged.
    pub async fn search(&self, query: &str, options: &QueryOptions) -> Result<JsonValue> {
        validate_params(options)?;

        let params = request::search_params(query, &self.config.default_params, options);
        let path = self.collection_path(SELECT_HANDLER);
        debug!("Searching {} with q={}", path, query);

        self.http
            .get_json(&path, RequestConfig::new().query_pairs(params))
            .await
    }

    /// POST an update body with the configured commit directive
    async fn update(&self, payload: JsonValue) -> Result<JsonValue> {
        let path = self.collection_path(UPDATE_HANDLER);
        let config = RequestConfig::new()
            .query_pairs(self.config.commit.query_params())
            .json(payload);

        self.http.post_json(&path, config).await
    }

    /// `<collection>/<handler>`, or just the handler when no collection is set
    fn collection_path(&self, handler: &str) -> String {
        let collection = self.config.default_collection.trim_matches('/');
        if collection.is_empty() {
            handler.to_string()
        } else {
            format!("{collection}/{handler}")
        }
    }
}

/// `response.numFound` of a select response
fn num_found(response: &JsonValue) -> Result<u64> {
    response
        .pointer("/response/numFound")
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| Error::decode("select response has no integer response.numFound"))
}
