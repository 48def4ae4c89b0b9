//! HTTP transport module
//!
//! Provides the thin HTTP layer under [`crate::SolrClient`].
//!
//! # Features
//!
//! - **JSON in, JSON out**: request bodies are serialized as JSON and every
//!   successful response body is decoded into a `serde_json::Value`
//! - **Uniform failures**: network errors and non-2xx statuses both surface
//!   as [`crate::Error::Transport`], after being logged
//! - **No retries**: each call is exactly one round trip

mod client;
mod response;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use response::{decode_response, transport_failure};
