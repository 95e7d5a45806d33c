use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer_config::{AnswerConfig, QuestionKind};
use super::answer_option::AnswerOption;
use super::question::Question;
use crate::services::validation_service::FieldErrors;

/// In-progress question for one authoring session. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: Uuid,
    #[serde(default)]
    pub content: String,
    pub question_type_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub difficulty_level_id: Option<i64>,
    #[serde(default)]
    pub answers: Vec<AnswerOption>,
    pub answer_config: AnswerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl QuestionDraft {
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: String::new(),
            question_type_id: None,
            subject_id: None,
            difficulty_level_id: None,
            answers: Vec::new(),
            answer_config: AnswerConfig::empty(kind),
            explanation: None,
            is_public: None,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.answer_config.kind()
    }

    /// Switches the draft to another kind. Answers and configuration of the
    /// previous kind cannot be carried over, so both start empty again.
    /// Returns whether anything was reset.
    pub fn set_kind(&mut self, kind: QuestionKind) -> bool {
        if self.kind() == kind {
            return false;
        }
        tracing::debug!(draft = %self.id, from = %self.kind(), to = %kind, "draft kind changed");
        self.answers.clear();
        self.answer_config = AnswerConfig::empty(kind);
        true
    }

    /// Back to a blank form of the same kind, as after submit or cancel.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind());
    }

    /// Builds the submit payload; selectors left empty are field errors.
    pub fn to_question(&self) -> Result<Question, FieldErrors> {
        let missing = [
            ("question_type_id", self.question_type_id, "Question type is required"),
            ("subject_id", self.subject_id, "Subject is required"),
            (
                "difficulty_level_id",
                self.difficulty_level_id,
                "Difficulty level is required",
            ),
        ];
        if let Some((field, _, message)) = missing.iter().find(|(_, v, _)| v.is_none()) {
            return Err(FieldErrors::single(*field, *message));
        }

        Ok(Question {
            content: self.content.trim().to_string(),
            question_type_id: self.question_type_id.unwrap_or_default(),
            subject_id: self.subject_id.unwrap_or_default(),
            difficulty_level_id: self.difficulty_level_id.unwrap_or_default(),
            answers: self.answers.clone(),
            answer_config: self.answer_config.clone(),
            explanation: self.explanation.clone(),
            is_public: self.is_public,
        })
    }
}
