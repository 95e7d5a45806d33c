use reqwest::Client;
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::services::reference_service::{endpoint, ReferenceService};
use crate::services::validation_service::{FieldErrors, ValidationService};

/// Forwards validated questions to the upstream question-creation endpoint.
#[derive(Clone)]
pub struct QuestionService {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    reference: ReferenceService,
}

impl QuestionService {
    pub fn new(
        client: Client,
        base_url: Url,
        api_token: Option<String>,
        reference: ReferenceService,
    ) -> Self {
        Self {
            client,
            base_url,
            api_token,
            reference,
        }
    }

    /// Nothing is sent upstream unless the question passes every check.
    pub async fn submit(&self, question: Question, cancel: &CancellationToken) -> Result<JsonValue> {
        let code = self
            .reference
            .question_type_code(question.question_type_id, cancel)
            .await?
            .ok_or_else(|| {
                Error::Question(FieldErrors::single(
                    "question_type_id",
                    format!("Unknown question type {}", question.question_type_id),
                ))
            })?;

        ValidationService::validate_question(&question, Some(&code)).map_err(Error::Question)?;

        let url = endpoint(&self.base_url, "questions")?;
        let mut request = self.client.post(url).json(&question);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            res = request.send() => res?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "question rejected upstream");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let created = response.json::<JsonValue>().await?;
        info!(
            kind = %question.kind(),
            subject_id = question.subject_id,
            answers = question.answers.len(),
            "question submitted"
        );
        Ok(created)
    }
}
