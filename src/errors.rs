//! Crate-wide error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    ontology::{loader::LoadError, value_objects::IriError},
    profile::ProfileError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("cannot load configuration `{path}`: {reason}")]
    Config { path: String, reason: String },

    #[error(transparent)]
    Iri(#[from] IriError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Tera(#[from] tera::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Iri(_) => StatusCode::BAD_REQUEST,
            Self::Profile(ProfileError::EmptyName) => StatusCode::BAD_REQUEST,
            Self::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    error: String,
    description: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(err.msg = %self, err.detail = ?self, "controller_error");
        } else {
            tracing::debug!(err.msg = %self, "request_rejected");
        }
        let body = ErrorDetail {
            error: status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            description: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
