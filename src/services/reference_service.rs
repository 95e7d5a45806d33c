use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{Error, Result};
use crate::models::reference::{
    DifficultyLevel, ListEnvelope, QuestionType, ReferenceData, Subject,
};

/// Read-only lookups that populate the authoring form's selectors.
#[derive(Clone)]
pub struct ReferenceService {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl ReferenceService {
    pub fn new(client: Client, base_url: Url, api_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_token,
        }
    }

    pub async fn fetch_subjects(&self, cancel: &CancellationToken) -> Result<Vec<Subject>> {
        self.fetch_list("subjects", cancel).await
    }

    pub async fn fetch_question_types(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<QuestionType>> {
        self.fetch_list("question-types", cancel).await
    }

    pub async fn fetch_difficulty_levels(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<DifficultyLevel>> {
        self.fetch_list("difficulty-levels", cancel).await
    }

    pub async fn fetch_all(&self, cancel: &CancellationToken) -> Result<ReferenceData> {
        let (subjects, question_types, difficulty_levels) = tokio::try_join!(
            self.fetch_subjects(cancel),
            self.fetch_question_types(cancel),
            self.fetch_difficulty_levels(cancel),
        )?;
        Ok(ReferenceData {
            subjects,
            question_types,
            difficulty_levels,
        })
    }

    /// Resolves the `code` of a question type id, if the upstream knows it.
    pub async fn question_type_code(
        &self,
        question_type_id: i64,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let types = self.fetch_question_types(cancel).await?;
        Ok(types
            .into_iter()
            .find(|t| t.id == question_type_id)
            .map(|t| t.code))
    }

    /// A cancelled token wins over a response that is still in flight, and
    /// the late response is dropped unread.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>> {
        let url = endpoint(&self.base_url, path)?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(%url, "reference fetch cancelled");
                Err(Error::Cancelled)
            }
            res = self.get_json::<ListEnvelope<T>>(url.clone()) => {
                res.map(ListEnvelope::into_items).map_err(|e| {
                    tracing::warn!(%url, error = %e, "reference fetch failed");
                    e
                })
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Joins `path` below `base`, whether or not `base` ends with a slash.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::Config(format!("Invalid upstream path {}: {}", path, e)))
}
