//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::SolrClient;
use crate::config::SolrConfig;
use crate::error::{Error, Result, ResultExt};
use crate::params::valid_params;
use crate::types::{DeleteCriteria, Document, JsonValue, QueryOptions};
use serde_json::json;
use std::fs;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search { query, params } => self.search(query, params).await,
            Commands::Add { document } => self.add(document).await,
            Commands::BulkAdd { documents } => self.bulk_add(documents).await,
            Commands::Delete {
                query,
                field,
                values,
            } => {
                self.delete(query.as_deref(), field.as_deref(), values.as_deref())
                    .await
            }
            Commands::DeleteOne { value, field } => self.delete_one(value, field).await,
            Commands::Params => self.params(),
            Commands::Config => self.show_config(),
        }
    }

    /// Load configuration from file or environment, then apply CLI overrides
    fn load_config(&self) -> Result<SolrConfig> {
        let mut config = match &self.cli.config {
            Some(path) => SolrConfig::from_file(path)?,
            None => SolrConfig::from_env()?,
        };

        if let Some(base_uri) = &self.cli.base_uri {
            config.base_uri.clone_from(base_uri);
        }
        if let Some(collection) = &self.cli.collection {
            config.default_collection.clone_from(collection);
        }
        if let Some(commit) = self.cli.commit {
            config.commit = commit;
        }

        Ok(config)
    }

    /// Build a client from the effective configuration
    fn client(&self) -> Result<SolrClient> {
        SolrClient::new(self.load_config()?)
    }

    async fn search(&self, query: &str, params: &[(String, String)]) -> Result<()> {
        let options: QueryOptions = params.iter().cloned().collect();
        let response = self.client()?.search(query, &options).await?;
        self.output(&response)
    }

    async fn add(&self, document: &str) -> Result<()> {
        let document = to_document(read_json_arg(document)?)?;
        let response = self.client()?.add_document(&document).await?;
        self.output(&response)
    }

    async fn bulk_add(&self, documents: &str) -> Result<()> {
        let documents = match read_json_arg(documents)? {
            JsonValue::Array(items) => items
                .into_iter()
                .map(to_document)
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::config(format!(
                    "expected a JSON array of documents, got {other}"
                )))
            }
        };
        let response = self.client()?.bulk_add_documents(&documents).await?;
        self.output(&response)
    }

    async fn delete(
        &self,
        query: Option<&str>,
        field: Option<&str>,
        values: Option<&[String]>,
    ) -> Result<()> {
        let criteria = DeleteCriteria::from_value(&criteria_json(query, field, values))?;
        let response = self.client()?.bulk_delete_documents(&criteria).await?;
        self.output(&response)
    }

    async fn delete_one(&self, value: &str, field: &str) -> Result<()> {
        let response = self.client()?.delete_single_document(value, field).await?;
        self.output(&response)
    }

    fn params(&self) -> Result<()> {
        self.output(&json!(valid_params()))
    }

    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        self.output(&serde_json::to_value(config)?)
    }

    /// Print a JSON value in the selected format
    fn output(&self, value: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Parse inline JSON, or the contents of a file when prefixed with `@`
fn read_json_arg(arg: &str) -> Result<JsonValue> {
    let content = match arg.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'"))?
        }
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&content)?)
}

fn to_document(value: JsonValue) -> Result<Document> {
    match value {
        JsonValue::Object(doc) => Ok(doc),
        other => Err(Error::config(format!(
            "expected a JSON object document, got {other}"
        ))),
    }
}

/// Loose criteria object in the shape `DeleteCriteria::from_value` expects
fn criteria_json(query: Option<&str>, field: Option<&str>, values: Option<&[String]>) -> JsonValue {
    let mut criteria = serde_json::Map::new();
    if let Some(q) = query {
        criteria.insert("q".to_string(), json!(q));
    }
    if let Some(field) = field {
        criteria.insert("field".to_string(), json!(field));
    }
    if let Some(values) = values {
        criteria.insert("values".to_string(), json!(values));
    }
    JsonValue::Object(criteria)
}
