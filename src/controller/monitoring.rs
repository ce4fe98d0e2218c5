//! Liveness and readiness routes.

use axum::{extract::State, response::Response, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format;
use crate::{app::AppContext, Result};

/// Represents the health status of the application.
#[derive(Serialize)]
pub struct Health {
    pub ok: bool,
}

/// Readiness details: whether an ontology is loaded and how many classes it
/// offers.
#[derive(Serialize)]
pub struct Readiness {
    pub ok: bool,
    pub ontology_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub classes: usize,
}

/// Check application ping endpoint
///
/// # Errors
/// This function always returns `Ok` with a JSON response indicating the
/// process is up.
pub async fn ping() -> Result<Response> {
    format::json(Health { ok: true })
}

/// Reports whether the ontology is loaded. The service still answers when it
/// is not; profiles can then be built from the builtin fields.
///
/// # Errors
/// This function always returns `Ok`.
pub async fn health(State(ctx): State<AppContext>) -> Result<Response> {
    let ontology = ctx.ontology.read().await;
    format::json(Readiness {
        ok: true,
        ontology_loaded: ontology.is_loaded(),
        loaded_at: ontology.loaded_at(),
        classes: ontology.hierarchy().declared().count(),
    })
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/_ping", get(ping))
        .route("/_health", get(health))
}
