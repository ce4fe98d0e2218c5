use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{entities::SelectedField, ProfileError};

/// Body posted to the profile backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub fields: Vec<SelectedField>,
}

/// What the backend answers on success.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl SubmissionReceipt {
    /// Message reported when the backend accepted the fields without a
    /// receipt body.
    pub const ACCEPTED: &'static str = "Profile saved!";

    #[must_use]
    pub fn accepted() -> Self {
        Self {
            message: Self::ACCEPTED.to_string(),
            data: serde_json::Value::Null,
        }
    }
}

/// Posts profile fields as JSON to a configured endpoint.
#[derive(Clone, Debug)]
pub struct ProfileSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl ProfileSubmitter {
    /// # Errors
    ///
    /// When the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProfileError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProfileError::Submit(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `{ "fields": [...] }`.
    ///
    /// # Errors
    ///
    /// Transport failures and non-success statuses. A success reply whose
    /// body is empty or not a receipt yields [`SubmissionReceipt::accepted`].
    pub async fn submit(&self, fields: &[SelectedField]) -> Result<SubmissionReceipt, ProfileError> {
        let payload = ProfilePayload {
            fields: fields.to_vec(),
        };
        tracing::debug!(endpoint = %self.endpoint, fields = fields.len(), "profile_submit");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProfileError::Submit(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileError::Submit(format!(
                "endpoint answered {status}: {body}"
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| ProfileError::Submit(err.to_string()))?;
        if body.is_empty() {
            return Ok(SubmissionReceipt::accepted());
        }
        Ok(serde_json::from_slice(&body).unwrap_or_else(|err| {
            tracing::debug!(%status, err.msg = %err, "profile_submit_unrecognized_reply");
            SubmissionReceipt::accepted()
        }))
    }
}
