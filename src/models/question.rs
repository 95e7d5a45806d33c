use serde::{Deserialize, Serialize};
use validator::Validate;

use super::answer_config::{AnswerConfig, QuestionKind};
use super::answer_option::AnswerOption;

/// Omitted scalar fields deserialize to their zero value so the derive
/// rules report them as field errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Question {
    #[serde(default)]
    #[validate(length(min = 1, message = "Question content cannot be empty"))]
    pub content: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "Question type is required"))]
    pub question_type_id: i64,
    #[serde(default)]
    #[validate(range(min = 1, message = "Subject is required"))]
    pub subject_id: i64,
    #[serde(default)]
    #[validate(range(min = 1, message = "Difficulty level is required"))]
    pub difficulty_level_id: i64,
    #[serde(default)]
    #[validate(nested)]
    pub answers: Vec<AnswerOption>,
    pub answer_config: AnswerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        self.answer_config.kind()
    }
}
