use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use profile_builder::{
    app::{self, AppContext},
    config::Config,
    controller,
    ontology::{CyclePolicy, OntologyStore},
    profile::ProfileStore,
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod monitoring;
mod ontology;
mod profile;

pub const BASE: &str = "http://example.com/ont";

pub const ONTOLOGY: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
    <#Goods> a owl:Class .\n\
    <#Container> a owl:Class .\n\
    <#Pallet> a owl:Class ; rdfs:subClassOf <#Container> .\n\
    <#weight> rdfs:domain <#Goods> .\n";

pub async fn router_with(ontology: OntologyStore) -> Router {
    router_with_sources(ontology, &[]).await
}

pub async fn router_with_sources(ontology: OntologyStore, sources: &[&str]) -> Router {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("profile-builder-http-{seed}"));
    let sources = if sources.is_empty() {
        " []\n".to_string()
    } else {
        sources
            .iter()
            .map(|source| format!("\n    - {source}"))
            .collect::<String>()
            + "\n"
    };
    let config = Config::from_yaml_template(&format!(
        "logger:\n  enable: false\nontology:\n  base_iri: {BASE}\n  sources:{sources}profiles:\n  store_path: {}\n  export_dir: {}\n",
        dir.join("profiles.json").display(),
        dir.join("exports").display(),
    ))
    .expect("config");
    let loader = app::create_loader(&config).expect("loader");
    let profiles = ProfileStore::open(&config.profiles.store_path)
        .await
        .expect("store");
    controller::routes(AppContext::with_ontology(config, loader, ontology, profiles))
}

pub async fn router() -> Router {
    router_with(OntologyStore::from_turtle(ONTOLOGY, BASE, CyclePolicy::Break).expect("ontology"))
        .await
}

pub async fn call(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
