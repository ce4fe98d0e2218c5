use axum::http::{Method, StatusCode};
use profile_builder::ontology::OntologyStore;
use serde_json::json;

use super::{call, router, router_with};

#[tokio::test]
async fn ping_answers_ok() {
    let (status, body) = call(router().await, Method::GET, "/_ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn health_reports_loaded_ontology() {
    let (status, body) = call(router().await, Method::GET, "/_health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ontology_loaded"], json!(true));
    assert_eq!(body["classes"], json!(3));
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn health_without_ontology() {
    let (_, body) = call(
        router_with(OntologyStore::empty()).await,
        Method::GET,
        "/_health",
        None,
    )
    .await;
    assert_eq!(body["ontology_loaded"], json!(false));
    assert_eq!(body["classes"], json!(0));
    assert!(body.get("loaded_at").is_none());
}
