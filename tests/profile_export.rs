use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use profile_builder::{
    controller,
    ontology::{loader::parse_turtle, vocab::owl, vocab::rdf, CyclePolicy, Iri, OntologyStore},
    profile::{
        ProfileService, ProfileStore, ProfileSubmitter, SelectedField, SelectionSet,
        SubmissionReceipt,
    },
};
use serde_json::json;

const BASE: &str = "http://example.com/ont";

const TWO_CLASSES: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
    <#Container> a owl:Class .\n\
    <#Goods> a owl:Class .\n";

fn scratch_dir(label: &str) -> PathBuf {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock")
        .as_nanos();
    std::env::temp_dir().join(format!("profile-builder-{label}-{seed}"))
}

fn selection(locals: &[&str]) -> SelectionSet {
    locals
        .iter()
        .map(|local| SelectedField::new(Iri::new(format!("{BASE}#{local}")).expect("iri")))
        .collect()
}

#[tokio::test]
async fn saving_writes_named_turtle_and_json_projection() {
    let dir = scratch_dir("save");
    let ontology = OntologyStore::from_turtle(TWO_CLASSES, BASE, CyclePolicy::Break).expect("ontology");
    let store = ProfileStore::open(dir.join("profiles.json")).await.expect("store");
    let mut service = ProfileService::new(dir.join("exports"), store, None);

    let saved = service
        .save(&ontology, "Test", &selection(&["Container", "Goods"]))
        .await
        .expect("saved");

    assert_eq!(saved.path, dir.join("exports").join("Test.ttl"));
    let written = std::fs::read_to_string(&saved.path).expect("exported file");
    let reparsed = parse_turtle(&written, BASE).expect("exported turtle parses");
    let declared: Vec<_> = reparsed
        .matching(None, Some(rdf::TYPE), None)
        .filter(|statement| statement.object.as_iri().map(Iri::as_str) == Some(owl::CLASS.as_str()))
        .filter_map(|statement| statement.subject.as_iri().map(|iri| iri.label().to_owned()))
        .collect();
    assert_eq!(declared, vec!["Container", "Goods"]);

    assert_eq!(
        serde_json::to_value(&saved.document.json).expect("json"),
        json!({
            "Container": {"type": "Class", "properties": {}},
            "Goods": {"type": "Class", "properties": {}},
        })
    );

    let reopened = ProfileStore::open(dir.join("profiles.json")).await.expect("reopen");
    let record = reopened.get("Test").expect("recorded");
    assert_eq!(record.fields.len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn blank_name_writes_nothing() {
    let dir = scratch_dir("blank");
    let ontology = OntologyStore::from_turtle(TWO_CLASSES, BASE, CyclePolicy::Break).expect("ontology");
    let store = ProfileStore::open(dir.join("profiles.json")).await.expect("store");
    let mut service = ProfileService::new(dir.join("exports"), store, None);

    let result = service
        .save(&ontology, "   ", &selection(&["Container"]))
        .await;

    assert!(result.is_err());
    assert!(!dir.join("exports").exists());
    assert!(service.store().list().is_empty());
}

#[tokio::test]
async fn submitter_posts_fields_to_backend() {
    let dir = scratch_dir("submit");
    let config = profile_builder::config::Config::from_yaml_template(&format!(
        "ontology:\n  base_iri: {BASE}\nprofiles:\n  store_path: {}\n  export_dir: {}\n",
        dir.join("profiles.json").display(),
        dir.join("exports").display(),
    ))
    .expect("config");
    let loader = profile_builder::app::create_loader(&config).expect("loader");
    let profiles = ProfileStore::open(&config.profiles.store_path).await.expect("store");
    let ctx = profile_builder::app::AppContext::with_ontology(
        config,
        loader,
        OntologyStore::empty(),
        profiles,
    );

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind");
    let address = listener.local_addr().expect("address");
    let server = tokio::spawn(async move {
        axum::serve(listener, controller::routes(ctx)).await.ok();
    });

    let submitter = ProfileSubmitter::new(
        format!("http://{address}/api/profile"),
        Duration::from_secs(5),
    )
    .expect("client");
    let fields = selection(&["Container"]);
    let receipt = submitter.submit(fields.as_slice()).await.expect("submitted");

    assert_eq!(receipt.message, "Profile saved!");
    assert_eq!(
        receipt.data["fields"][0]["iri"],
        json!(format!("{BASE}#Container"))
    );

    server.abort();
}

#[tokio::test]
async fn unreachable_backend_is_reported() {
    let submitter = ProfileSubmitter::new("http://127.0.0.1:9/api/profile", Duration::from_millis(500))
        .expect("client");
    let fields = selection(&["Goods"]);
    assert!(submitter.submit(fields.as_slice()).await.is_err());
}

async fn spawn_backend(router: axum::Router) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind");
    let address = listener.local_addr().expect("address");
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    (address, server)
}

#[tokio::test]
async fn empty_success_reply_counts_as_accepted() {
    let backend = axum::Router::new().route(
        "/api/profile",
        axum::routing::post(|| async { axum::http::StatusCode::NO_CONTENT }),
    );
    let (address, server) = spawn_backend(backend).await;

    let submitter = ProfileSubmitter::new(
        format!("http://{address}/api/profile"),
        Duration::from_secs(5),
    )
    .expect("client");
    let receipt = submitter
        .submit(selection(&["Goods"]).as_slice())
        .await
        .expect("2xx without body is a success");
    assert_eq!(receipt, SubmissionReceipt::accepted());

    server.abort();
}

#[tokio::test]
async fn unrecognized_success_body_counts_as_accepted() {
    let backend = axum::Router::new().route(
        "/api/profile",
        axum::routing::post(|| async {
            (axum::http::StatusCode::CREATED, axum::Json(json!({"id": 7})))
        }),
    );
    let (address, server) = spawn_backend(backend).await;

    let submitter = ProfileSubmitter::new(
        format!("http://{address}/api/profile"),
        Duration::from_secs(5),
    )
    .expect("client");
    let receipt = submitter
        .submit(selection(&["Goods"]).as_slice())
        .await
        .expect("201 is a success");
    assert_eq!(receipt.message, SubmissionReceipt::ACCEPTED);

    server.abort();
}

#[tokio::test]
async fn error_status_is_reported() {
    let backend = axum::Router::new().route(
        "/api/profile",
        axum::routing::post(|| async { axum::http::StatusCode::UNPROCESSABLE_ENTITY }),
    );
    let (address, server) = spawn_backend(backend).await;

    let submitter = ProfileSubmitter::new(
        format!("http://{address}/api/profile"),
        Duration::from_secs(5),
    )
    .expect("client");
    assert!(submitter.submit(selection(&["Goods"]).as_slice()).await.is_err());

    server.abort();
}
