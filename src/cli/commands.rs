//! CLI commands and argument parsing

use crate::types::CommitPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for Apache Solr
#[derive(Parser, Debug)]
#[command(name = "solr-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON). Defaults to SOLR_* environment variables
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Solr base URI (overrides config)
    #[arg(short, long, global = true)]
    pub base_uri: Option<String>,

    /// Collection name (overrides config)
    #[arg(short, long, global = true)]
    pub collection: Option<String>,

    /// Commit policy for updates: true, soft, none or milliseconds
    #[arg(long, global = true)]
    pub commit: Option<CommitPolicy>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the collection
    Search {
        /// Solr query string, e.g. "title:Test"
        query: String,

        /// Extra query parameter (repeatable), e.g. -p rows=10
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Add a single document (inline JSON object or @file)
    Add {
        /// Document JSON, or @path to read it from a file
        document: String,
    },

    /// Add several documents in one request (inline JSON array or @file)
    BulkAdd {
        /// Documents JSON array, or @path to read it from a file
        documents: String,
    },

    /// Delete documents by query or by field values
    Delete {
        /// Delete query, e.g. "category:Books"
        #[arg(short, long)]
        query: Option<String>,

        /// Field to match values against
        #[arg(long)]
        field: Option<String>,

        /// Comma-separated values to delete
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<String>>,
    },

    /// Delete one document by field value, refusing if the value is not unique
    DeleteOne {
        /// Value to match
        value: String,

        /// Field to match on
        #[arg(long, default_value = crate::client::DEFAULT_ID_FIELD)]
        field: String,
    },

    /// List accepted query parameter names
    Params,

    /// Show the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse a `key=value` pair
pub(crate) fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=value: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
