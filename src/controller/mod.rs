//! HTTP surface of the profile builder.
//!
//! | Method | Path                    | Purpose                                   |
//! |--------|-------------------------|-------------------------------------------|
//! | GET    | `/_ping`                | liveness                                  |
//! | GET    | `/_health`              | ontology readiness                        |
//! | GET    | `/api/classes`          | fields available for selection            |
//! | POST   | `/api/ontology/reload`  | reload configured ontology sources        |
//! | POST   | `/api/profile`          | receive a submitted `{fields: [...]}`     |
//! | POST   | `/api/profile/subset`   | Turtle + JSON for a named selection       |
//! | GET    | `/api/profiles`         | profiles saved in the local store         |

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::AppContext;

pub mod format;
pub mod monitoring;
pub mod ontology;
pub mod profile;

/// Builds the full router bound to `ctx`.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .merge(monitoring::routes())
        .merge(ontology::routes())
        .merge(profile::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
