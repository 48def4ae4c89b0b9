// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # solr-client
//!
//! A thin, typed client for the Apache Solr HTTP API.
//!
//! ## Features
//!
//! - **Search**: `select` queries with an allow-list check on parameter names
//! - **Indexing**: single and bulk document adds with a configurable commit
//! - **Deletes**: by query, by field values, or a single document after a
//!   uniqueness check
//! - **Config**: explicit builder, `SOLR_*` environment variables, or YAML/JSON file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solr_client::{QueryOptions, Result, SolrClient, SolrConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SolrConfig::builder()
//!         .base_uri("http://localhost:8983/solr")
//!         .collection("products")
//!         .build();
//!     let client = SolrClient::new(config)?;
//!
//!     let mut options = QueryOptions::new();
//!     options.insert("rows".into(), "10".into());
//!     let results = client.search("title:Test", &options).await?;
//!     println!("{}", results["response"]["numFound"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        SolrClient                        │
//! │  search   add_document   bulk_add   bulk_delete   delete │
//! └──────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────┬────────────────┴───┬───────────────────────┐
//! │   params   │      request       │         http          │
//! ├────────────┼────────────────────┼───────────────────────┤
//! │ allow-list │ param precedence   │ GET select            │
//! │            │ add/delete bodies  │ POST update           │
//! │            │ uniqueness check   │ JSON decode / failure │
//! └────────────┴────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query parameter allow-list
pub mod params;

/// Request parameter and payload construction
pub mod request;

/// HTTP transport and response mapping
pub mod http;

/// Client configuration
pub mod config;

/// The Solr client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::SolrClient;
pub use config::SolrConfig;
pub use error::{Error, Result};
pub use types::*;

