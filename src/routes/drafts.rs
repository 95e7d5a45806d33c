use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::question_dto::{
        ChangeKindPayload, CreateDraftPayload, DraftEditPayload, DraftResponse,
        DraftValidatePayload, ValidationResponse,
    },
    error::Result,
    utils::json::AppJson,
    models::draft::QuestionDraft,
    services::{drag_drop_editor::DragDropEditor, validation_service::ValidationService},
    AppState,
};

pub async fn create_draft(AppJson(payload): AppJson<CreateDraftPayload>) -> impl IntoResponse {
    let draft = QuestionDraft::new(payload.kind);
    tracing::info!(draft = %draft.id, kind = %payload.kind, "draft created");
    (
        StatusCode::CREATED,
        Json(DraftResponse { draft, reset: false }),
    )
}

pub async fn change_kind(AppJson(payload): AppJson<ChangeKindPayload>) -> impl IntoResponse {
    let mut draft = payload.draft;
    let reset = draft.set_kind(payload.kind);
    Json(DraftResponse { draft, reset })
}

#[axum::debug_handler]
pub async fn edit_drag_drop(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DraftEditPayload>,
) -> Result<impl IntoResponse> {
    let mut draft = payload.draft;
    DragDropEditor::for_draft(&mut draft, state.limits)?.apply(payload.op)?;
    Ok(Json(DraftResponse {
        draft,
        reset: false,
    }))
}

#[axum::debug_handler]
pub async fn validate_draft(
    AppJson(payload): AppJson<DraftValidatePayload>,
) -> Result<impl IntoResponse> {
    let question = payload.draft.to_question()?;
    ValidationService::validate_question(&question, payload.question_type_code.as_deref())?;
    Ok(Json(ValidationResponse {
        valid: true,
        errors: Vec::new(),
    }))
}
