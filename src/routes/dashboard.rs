//! Dashboard routes: the overview summary, calls and notes tabs, and the
//! active tab preference.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::services::auth as auth_service;
use crate::services::dashboard::{self, CallView, DashboardSummary, NoteView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SetTabRequest {
    pub tab: String,
}

/// GET /api/v1/dashboard — aggregated summary for the overview page.
pub async fn summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let user = auth_service::find_user_by_id(&state.db, current_user.id).await?;
    let summary = dashboard::get_summary(&state.db, &user).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/v1/dashboard/calls — the 15 most recent calls.
pub async fn calls(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<CallView>>>, AppError> {
    let calls = dashboard::recent_calls(&state.db, current_user.account_id).await?;
    Ok(ApiResponse::success(calls))
}

/// GET /api/v1/dashboard/notes — all favorited notes, newest first.
pub async fn notes(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<NoteView>>>, AppError> {
    let user = auth_service::find_user_by_id(&state.db, current_user.id).await?;
    let notes = dashboard::favorited_notes(&state.db, &user).await?;
    Ok(ApiResponse::success(notes))
}

/// POST /api/v1/dashboard/tab — persist the active tab preference.
pub async fn set_tab(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SetTabRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    dashboard::set_active_tab(&state.db, current_user.id, &body.tab).await?;
    Ok(ApiResponse::success(()))
}
