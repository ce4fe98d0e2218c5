#![cfg(feature = "cli")]

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use profile_builder::{
    cli::{generate_profile, GenerateArgs},
    config::Config,
    Error,
};

const ONTOLOGY: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
    @prefix : <http://example.com/ont#> .\n\
    :Container a owl:Class .\n\
    :Pallet a owl:Class ; rdfs:subClassOf :Container .\n\
    :Goods a owl:Class .\n";

fn scratch_dir(label: &str) -> PathBuf {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("profile-builder-cli-{label}-{seed}"));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

fn config_in(dir: &Path, endpoint: Option<&str>) -> Config {
    let source = dir.join("ontology.ttl");
    std::fs::write(&source, ONTOLOGY).expect("ontology file");
    let endpoint = endpoint
        .map(|endpoint| format!("  endpoint: {endpoint}\n  request_timeout_ms: 500\n"))
        .unwrap_or_default();
    Config::from_yaml_template(&format!(
        "logger:\n  enable: false\nontology:\n  base_iri: http://example.com/ont\n  sources:\n    - {}\nprofiles:\n  store_path: {}\n  export_dir: {}\n{endpoint}",
        source.display(),
        dir.join("profiles.json").display(),
        dir.join("exports").display(),
    ))
    .expect("config")
}

fn args(name: &str, classes: &[&str]) -> GenerateArgs {
    GenerateArgs {
        name: name.to_string(),
        classes: classes.iter().map(ToString::to_string).collect(),
        ..GenerateArgs::default()
    }
}

#[tokio::test]
async fn generate_resolves_labels_and_iris() {
    let dir = scratch_dir("resolve");
    let out = dir.join("elsewhere");
    let mut request = args(
        "Cargo manifest",
        &[
            "Container",
            "http://example.com/ont#Goods",
            "Goods",
            "http://example.com/ont#Unlisted",
        ],
    );
    request.out = Some(out.clone());

    let generated = generate_profile(config_in(&dir, None), &request)
        .await
        .expect("generated");

    assert_eq!(generated.saved.path, out.join("Cargo_manifest.ttl"));
    assert!(generated.saved.path.exists());
    assert!(!dir.join("exports").exists());
    assert_eq!(generated.duplicates, vec!["Goods".to_string()]);
    assert!(generated.submission.is_none());

    let declared: Vec<_> = generated
        .saved
        .document
        .declarations
        .iter()
        .map(|declaration| declaration.class.label().to_owned())
        .collect();
    assert_eq!(declared, vec!["Container", "Pallet", "Goods", "Unlisted"]);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn generate_rejects_unknown_input() {
    let dir = scratch_dir("unknown");

    let result = generate_profile(
        config_in(&dir, None),
        &args("Broken", &["Container", "no such class"]),
    )
    .await;

    assert!(matches!(result, Err(Error::BadRequest(_))));
    assert!(!dir.join("exports").exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn failed_submission_keeps_the_export() {
    let dir = scratch_dir("submit");
    let mut request = args("Sent", &["Goods"]);
    request.submit = true;

    let generated = generate_profile(
        config_in(&dir, Some("http://127.0.0.1:9/api/profile")),
        &request,
    )
    .await
    .expect("saved before submitting");

    assert!(generated.saved.path.exists());
    assert!(matches!(generated.submission, Some(Err(_))));

    std::fs::remove_dir_all(&dir).ok();
}
