//! External scorer client, the single point of entry for calls to the
//! downstream ML scoring service.
//!
//! One attempt per request, no retries: a failed call surfaces as an
//! external-service error on the request that triggered it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::employee::Employee;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scorer returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Scorer response carried no score")]
    MissingScore,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: Option<f64>,
}

/// Pluggable employee scorer. Held in `AppState` as `Arc<dyn EmployeeScorer>`
/// so tests can substitute a stub for the HTTP implementation.
#[async_trait]
pub trait EmployeeScorer: Send + Sync {
    async fn score(&self, employee: &Employee) -> Result<f64, ScorerError>;
}

/// HTTP implementation posting the full employee record to the configured
/// scoring service.
#[derive(Clone)]
pub struct HttpScorer {
    client: Client,
    base_url: String,
}

impl HttpScorer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    fn score_url(&self) -> String {
        format!("{}/score", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmployeeScorer for HttpScorer {
    async fn score(&self, employee: &Employee) -> Result<f64, ScorerError> {
        let response = self
            .client
            .post(self.score_url())
            .json(employee)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScorerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ScoreResponse = response.json().await?;
        let score = body.score.ok_or(ScorerError::MissingScore)?;

        debug!(employee_id = employee.id, score, "external scorer responded");

        Ok(score)
    }
}
