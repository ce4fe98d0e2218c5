use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::format;
use crate::{
    app::AppContext,
    ontology::store::OntologyStore,
    profile::catalog::{self, AvailableField},
    Result,
};

#[derive(Serialize)]
pub struct ClassListing {
    pub ontology_loaded: bool,
    pub fields: Vec<AvailableField>,
}

#[derive(Serialize)]
pub struct ReloadSummary {
    pub statements: usize,
    pub classes: usize,
}

/// Fields available for selection.
pub async fn classes(State(ctx): State<AppContext>) -> Result<Response> {
    let ontology = ctx.ontology.read().await;
    format::json(ClassListing {
        ontology_loaded: ontology.is_loaded(),
        fields: catalog::available_fields(&ontology, ctx.config.ontology.sort_by_label),
    })
}

/// Reloads every configured source. The current ontology stays in place
/// when loading fails.
pub async fn reload(State(ctx): State<AppContext>) -> Result<Response> {
    let settings = &ctx.config.ontology;
    let fresh = OntologyStore::load(&ctx.loader, &settings.sources, settings.cycle_policy).await?;
    let summary = ReloadSummary {
        statements: fresh.index().len(),
        classes: fresh.hierarchy().declared().count(),
    };
    *ctx.ontology.write().await = fresh;
    format::json(summary)
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/classes", get(classes))
        .route("/api/ontology/reload", post(reload))
}
