use axum::http::{Method, StatusCode};
use insta::assert_snapshot;
use serde_json::json;

use super::{call, router, BASE};

#[tokio::test]
async fn submitted_profile_is_echoed() {
    let fields = json!([{"iri": format!("{BASE}#Goods"), "label": "Goods"}]);
    let (status, body) = call(
        router().await,
        Method::POST,
        "/api/profile",
        Some(json!({ "fields": fields })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Profile saved!", "data": {"fields": fields}})
    );
}

#[tokio::test]
async fn subset_includes_subclasses_and_properties() {
    let (status, body) = call(
        router().await,
        Method::POST,
        "/api/profile/subset",
        Some(json!({
            "name": "Cargo manifest",
            "classes": [format!("{BASE}#Container"), format!("{BASE}#Goods")],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_name"], json!("Cargo_manifest.ttl"));
    assert_snapshot!(
        serde_json::to_string_pretty(&body["json"]).expect("json"),
        @r###"
    {
      "Container": {
        "properties": {},
        "type": "Class"
      },
      "Goods": {
        "properties": {
          "weight": "string"
        },
        "type": "Class"
      },
      "Pallet": {
        "parent": "Container",
        "properties": {},
        "type": "Class"
      }
    }
    "###
    );
    let turtle = body["turtle"].as_str().expect("turtle");
    assert!(turtle.contains("subClassOf"));
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (status, body) = call(
        router().await,
        Method::POST,
        "/api/profile/subset",
        Some(json!({"name": "  ", "classes": [format!("{BASE}#Goods")]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn invalid_class_iri_is_rejected() {
    let (status, _) = call(
        router().await,
        Method::POST,
        "/api/profile/subset",
        Some(json!({"name": "Broken", "classes": ["not an iri"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn saved_subset_is_listed() {
    let router = router().await;
    let (status, _) = call(
        router.clone(),
        Method::POST,
        "/api/profile/subset",
        Some(json!({"name": "Kept", "classes": [format!("{BASE}#Goods")], "save": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(router, Method::GET, "/api/profiles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], json!("Kept"));
    assert_eq!(body[0]["fields"][0]["label"], json!("Goods"));
}
