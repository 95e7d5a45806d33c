use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn get_reference(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cancel = state.shutdown.child_token();
    let data = state.reference_service.fetch_all(&cancel).await?;
    Ok(Json(data))
}
