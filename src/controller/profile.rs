use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::format;
use crate::{
    app::AppContext,
    ontology::value_objects::Iri,
    profile::{
        export, subset, ClassEntry, Profile, ProfileRecord, SelectedField, SelectionSet,
    },
    Error, Result,
};

/// Body accepted by `POST /api/profile`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub fields: Vec<Value>,
}

#[derive(Serialize)]
pub struct ProfileAccepted {
    pub message: &'static str,
    pub data: ProfileSubmission,
}

#[derive(Debug, Deserialize)]
pub struct SubsetRequest {
    pub name: String,
    pub classes: Vec<String>,
    /// Also append the profile to the local store.
    #[serde(default)]
    pub save: bool,
}

#[derive(Serialize)]
pub struct SubsetResponse {
    pub file_name: String,
    pub turtle: String,
    pub json: std::collections::BTreeMap<String, ClassEntry>,
}

/// Receives a submitted profile.
pub async fn receive(Json(profile): Json<ProfileSubmission>) -> Result<Response> {
    tracing::info!(fields = profile.fields.len(), "profile_received");
    tracing::debug!(?profile, "profile_received_payload");
    format::json(ProfileAccepted {
        message: "Profile saved!",
        data: profile,
    })
}

/// Generates the Turtle and JSON projections for a named selection.
pub async fn generate_subset(
    State(ctx): State<AppContext>,
    Json(request): Json<SubsetRequest>,
) -> Result<Response> {
    let ontology = ctx.ontology.read().await;

    let mut selection = SelectionSet::new();
    for text in &request.classes {
        let iri = Iri::new(text.as_str())
            .map_err(|err| Error::BadRequest(format!("invalid class IRI: {err}")))?;
        let field = ontology
            .hierarchy()
            .get(&iri)
            .map_or_else(|| SelectedField::new(iri.clone()), SelectedField::from);
        selection.add(field);
    }

    let profile = Profile::new(request.name, selection.into())?;
    let document = subset::generate(&ontology, profile.fields())?;
    drop(ontology);

    if request.save {
        ctx.profiles
            .lock()
            .await
            .append(ProfileRecord::from(&profile))
            .await?;
    }

    format::json(SubsetResponse {
        file_name: export::file_name(profile.name()),
        turtle: document.turtle,
        json: document.json,
    })
}

/// Profiles saved in the local store.
pub async fn saved(State(ctx): State<AppContext>) -> Result<Response> {
    let store = ctx.profiles.lock().await;
    format::json(store.list())
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/profile", post(receive))
        .route("/api/profile/subset", post(generate_subset))
        .route("/api/profiles", get(saved))
}
