//! CLI module
//!
//! Command-line interface over [`crate::SolrClient`].
//!
//! # Commands
//!
//! - `search` - Query the collection
//! - `add` - Add a single document
//! - `bulk-add` - Add a list of documents
//! - `delete` - Delete by query or by field values
//! - `delete-one` - Delete one document after a uniqueness check
//! - `params` - List accepted query parameter names
//! - `config` - Show the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
