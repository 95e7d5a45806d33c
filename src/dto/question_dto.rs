use serde::{Deserialize, Serialize};

use crate::models::answer_config::QuestionKind;
use crate::models::draft::QuestionDraft;
use crate::models::question::Question;
use crate::services::drag_drop_editor::EditOp;
use crate::services::validation_service::FieldError;

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateQuestionPayload {
    pub question: Question,
    /// `code` of the selected question type, when the form already knows it.
    #[serde(default)]
    pub question_type_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDraftPayload {
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeKindPayload {
    pub draft: QuestionDraft,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftEditPayload {
    pub draft: QuestionDraft,
    pub op: EditOp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftValidatePayload {
    pub draft: QuestionDraft,
    #[serde(default)]
    pub question_type_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub draft: QuestionDraft,
    /// Set when the draft's answers were discarded by a kind change.
    #[serde(default)]
    pub reset: bool,
}
