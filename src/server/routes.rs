//! HTTP routes for the advising service

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::types::{AskRequest, AskResponse};

use super::state::AppState;

/// GET / - static liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "컴공도우미봇 API가 실행 중입니다 🚀" }))
}

/// POST /ask - answer one student question.
///
/// Always returns 200 with an `{answer}` body; pipeline failures surface as
/// user-facing text inside the answer field.
pub async fn ask(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Json<AskResponse> {
    tracing::info!("Query: \"{}\"", request.query);
    let answer = state.answer(&request.query).await;
    Json(AskResponse { answer })
}
