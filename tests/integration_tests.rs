//! Integration tests using mock HTTP server
//!
//! Tests the full flow: SolrClient call → HTTP request → decoded JSON response

use serde_json::json;
use solr_client::{
    CommitPolicy, DeleteCriteria, Document, Error, QueryOptions, SolrClient, SolrConfig,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION: &str = "core_name";

fn config_for(server: &MockServer) -> SolrConfig {
    SolrConfig::builder()
        .base_uri(format!("{}/solr/", server.uri()))
        .collection(COLLECTION)
        .default_param("defType", "edismax")
        .default_param("sort", "score desc")
        .build()
}

fn client_for(server: &MockServer) -> SolrClient {
    SolrClient::new(config_for(server)).unwrap()
}

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn options(pairs: &[(&str, &str)]) -> QueryOptions {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_returns_body_verbatim() {
    let mock_server = MockServer::start().await;
    let body = json!({
        "response": {"numFound": 1, "docs": [{"id": "1", "title": "Test Document"}]}
    });

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("q", "title:Test"))
        .and(query_param("wt", "json"))
        .and(query_param("defType", "edismax"))
        .and(query_param("sort", "score desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client
        .search("title:Test", &QueryOptions::new())
        .await
        .unwrap();

    assert_eq!(results, body);
    assert_eq!(results["response"]["numFound"], 1);
    assert_eq!(results["response"]["docs"][0]["title"], "Test Document");
}

#[tokio::test]
async fn test_search_options_override_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("sort", "id asc"))
        .and(query_param("rows", "5"))
        .and(query_param("defType", "edismax"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .search("*:*", &options(&[("sort", "id asc"), ("rows", "5")]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_invalid_param_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .search("title:Test", &options(&[("rows", "10"), ("rowz", "10")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { ref name } if name == "rowz"));
}

#[tokio::test]
async fn test_search_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Error Communicating with Solr"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .search("title:Test", &QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    let message = err.to_string();
    assert!(message.contains("GET request failed in Solr"));
    assert!(message.contains("Error Communicating with Solr"));
}

#[tokio::test]
async fn test_search_options_override_tenant_defaults_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("q", "id:1"))
        .and(query_param("wt", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SolrConfig::builder()
        .base_uri(format!("{}/solr/", mock_server.uri()))
        .collection(COLLECTION)
        .default_param("wt", "xml")
        .default_param("q", "tenant:*")
        .build();
    let client = SolrClient::new(config).unwrap();

    client
        .search("*:*", &options(&[("wt", "json"), ("q", "id:1")]))
        .await
        .unwrap();
}

// ============================================================================
// Connection settings
// ============================================================================

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(header("Authorization", "Basic c29scjpzb2xy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config
        .headers
        .insert("Authorization".to_string(), "Basic c29scjpzb2xy".to_string());
    let client = SolrClient::new(config).unwrap();

    client.search("*:*", &QueryOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_sub_second_timeout_is_honoured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SolrConfig::builder()
        .base_uri(format!("{}/solr/", mock_server.uri()))
        .collection(COLLECTION)
        .timeout(Duration::from_millis(500))
        .build();
    assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

    let client = SolrClient::new(config).unwrap();
    client.search("*:*", &QueryOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_sub_second_timeout_fails_slow_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": {}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = SolrConfig::builder()
        .base_uri(format!("{}/solr/", mock_server.uri()))
        .collection(COLLECTION)
        .timeout(Duration::from_millis(200))
        .build();
    let client = SolrClient::new(config).unwrap();

    let err = client
        .search("*:*", &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

// ============================================================================
// Add
// ============================================================================

#[tokio::test]
async fn test_add_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(query_param("commit", "true"))
        .and(body_json(json!([{"id": "1", "title": "Test Document"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .add_document(&doc(json!({"id": "1", "title": "Test Document"})))
        .await
        .unwrap();

    assert_eq!(response["response"], "success");
}

#[tokio::test]
async fn test_bulk_add_documents() {
    let mock_server = MockServer::start().await;
    let docs = json!([
        {"id": "1", "title": "Document 1"},
        {"id": "2", "title": "Document 2"}
    ]);

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(query_param("commit", "true"))
        .and(body_json(docs.clone()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "bulk success"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let documents: Vec<Document> = docs
        .as_array()
        .unwrap()
        .iter()
        .cloned()
        .map(doc)
        .collect();

    let client = client_for(&mock_server);
    let response = client.bulk_add_documents(&documents).await.unwrap();

    assert_eq!(response["response"], "bulk success");
}

#[tokio::test]
async fn test_add_with_commit_within() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(query_param("commitWithin", "1000"))
        .and(query_param_is_missing("commit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.commit = CommitPolicy::Within(1000);
    let client = SolrClient::new(config).unwrap();

    client.add_document(&doc(json!({"id": "1"}))).await.unwrap();
}

#[tokio::test]
async fn test_add_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown field 'foo'"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .add_document(&doc(json!({"foo": "bar"})))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("POST request failed in Solr"));
    assert!(err.to_string().contains("unknown field 'foo'"));
}

// ============================================================================
// Bulk delete
// ============================================================================

#[tokio::test]
async fn test_bulk_delete_by_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(query_param("commit", "true"))
        .and(body_json(json!({"delete": {"query": "category:Books"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "query deleted"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .bulk_delete_documents(&DeleteCriteria::query("category:Books"))
        .await
        .unwrap();

    assert_eq!(response["response"], "query deleted");
}

#[tokio::test]
async fn test_bulk_delete_by_field_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(body_json(
            json!({"delete": [{"product_id": "1"}, {"product_id": "2"}]}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "field deleted"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let criteria = DeleteCriteria::from_value(&json!({
        "field": "product_id",
        "values": ["1", "2"]
    }))
    .unwrap();

    let client = client_for(&mock_server);
    let response = client.bulk_delete_documents(&criteria).await.unwrap();

    assert_eq!(response["response"], "field deleted");
}

#[tokio::test]
async fn test_bulk_delete_invalid_criteria_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let err = DeleteCriteria::from_value(&json!({})).unwrap_err();
    assert!(matches!(err, Error::InvalidDeleteCriteria { .. }));

    let err = client
        .bulk_delete_documents(&DeleteCriteria::field_values("product_id", Vec::<String>::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDeleteCriteria { .. }));
}

// ============================================================================
// Single delete
// ============================================================================

#[tokio::test]
async fn test_delete_single_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("fq", "product_id:1"))
        .and(query_param("rows", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 1, "docs": [{"id": "a", "product_id": "1"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(query_param("commit", "true"))
        .and(body_json(json!({"delete": {"product_id": "1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .delete_single_document("1", "product_id")
        .await
        .unwrap();

    assert_eq!(response["response"], "deleted");
}

#[tokio::test]
async fn test_delete_single_document_not_unique() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("fq", "product_id:1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 7, "docs": [{"id": "a"}, {"id": "b"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .delete_single_document("1", "product_id")
        .await
        .unwrap_err();

    match err {
        Error::NonUniqueValue {
            field,
            value,
            found,
        } => {
            assert_eq!(field, "product_id");
            assert_eq!(value, "1");
            assert_eq!(found, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_single_document_uniqueness_check_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_single_document("1", "id").await.unwrap_err();

    assert!(err.to_string().contains("GET request failed in Solr"));
}

#[tokio::test]
async fn test_delete_single_document_no_match_still_deletes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("fq", "product_id:42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 0, "docs": []}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(body_json(json!({"delete": {"product_id": "42"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .delete_single_document("42", "product_id")
        .await
        .unwrap();

    assert_eq!(response["response"], "deleted");
}

#[tokio::test]
async fn test_delete_single_document_escapes_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("fq", r"sku:a\ b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 1, "docs": [{"id": "x", "sku": "a b"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/solr/core_name/update"))
        .and(body_json(json!({"delete": {"sku": "a b"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.delete_single_document("a b", "sku").await.unwrap();
}

#[tokio::test]
async fn test_delete_single_document_disables_grouping_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .and(query_param("fq", "product_id:1"))
        .and(query_param("group", "false"))
        .and(query_param("group.field", "product_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 2, "docs": [{"id": "a"}, {"id": "b"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.default_params.insert("group".to_string(), "true".to_string());
    config
        .default_params
        .insert("group.field".to_string(), "product_id".to_string());
    let client = SolrClient::new(config).unwrap();

    let err = client
        .delete_single_document("1", "product_id")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NonUniqueValue { found: 2, .. }));
}

#[tokio::test]
async fn test_delete_single_document_unreadable_count_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/core_name/select"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "grouped": {"product_id": {"matches": 3, "groups": []}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .delete_single_document("1", "product_id")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}
