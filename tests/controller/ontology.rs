use axum::http::{Method, StatusCode};
use profile_builder::ontology::OntologyStore;
use serde_json::json;

use super::{call, router, router_with, router_with_sources, BASE};

#[tokio::test]
async fn classes_are_listed_by_label() {
    let (status, body) = call(router().await, Method::GET, "/api/classes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ontology_loaded"], json!(true));
    let labels: Vec<_> = body["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .map(|field| field["label"].as_str().expect("label").to_owned())
        .collect();
    assert_eq!(labels, vec!["Container", "Goods", "Pallet"]);
    assert_eq!(body["fields"][0]["iri"], json!(format!("{BASE}#Container")));
    assert_eq!(body["fields"][0]["source"], json!("declared"));
}

#[tokio::test]
async fn builtin_fields_without_ontology() {
    let (status, body) = call(
        router_with(OntologyStore::empty()).await,
        Method::GET,
        "/api/classes",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ontology_loaded"], json!(false));
    assert_eq!(body["fields"][0]["label"], json!("Text Field"));
    assert_eq!(body["fields"][0]["source"], json!("builtin"));
}

#[tokio::test]
async fn failed_reload_keeps_current_ontology() {
    let missing = std::env::temp_dir().join("profile-builder-no-such-ontology.ttl");
    let router = router_with_sources(
        OntologyStore::from_turtle(super::ONTOLOGY, BASE, Default::default()).expect("ontology"),
        &[&missing.display().to_string()],
    )
    .await;

    let (status, body) = call(router.clone(), Method::POST, "/api/ontology/reload", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["description"].is_string());

    let (_, body) = call(router, Method::GET, "/api/classes", None).await;
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn reload_replaces_ontology() {
    let router = router().await;
    let (status, body) = call(router.clone(), Method::POST, "/api/ontology/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"statements": 0, "classes": 0}));

    let (_, body) = call(router, Method::GET, "/api/classes", None).await;
    assert_eq!(body["ontology_loaded"], json!(true));
    assert_eq!(body["fields"][0]["source"], json!("builtin"));
}
