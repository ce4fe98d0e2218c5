//! Response helpers used by controllers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::Result;

/// Returns a 200 JSON response.
///
/// # Errors
///
/// Currently never fails; the `Result` keeps handler signatures uniform.
pub fn json<T: Serialize>(t: T) -> Result<Response> {
    Ok(Json(t).into_response())
}
