use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::question_dto::{ValidateQuestionPayload, ValidationResponse},
    error::Result,
    utils::json::AppJson,
    models::question::Question,
    services::validation_service::ValidationService,
    AppState,
};

#[axum::debug_handler]
pub async fn validate_question(
    AppJson(payload): AppJson<ValidateQuestionPayload>,
) -> Result<impl IntoResponse> {
    ValidationService::validate_question(
        &payload.question,
        payload.question_type_code.as_deref(),
    )?;
    Ok(Json(ValidationResponse {
        valid: true,
        errors: Vec::new(),
    }))
}

#[axum::debug_handler]
pub async fn submit_question(
    State(state): State<AppState>,
    AppJson(question): AppJson<Question>,
) -> Result<impl IntoResponse> {
    let cancel = state.shutdown.child_token();
    let created = state.question_service.submit(question, &cancel).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
