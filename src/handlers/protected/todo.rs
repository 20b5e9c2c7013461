use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};

use crate::middleware::{ApiResult, MessageResponse, ValidatedUser};
use crate::state::AppState;

/// POST /todo/:todo_id/category/:cat_id
pub async fn attach_category(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path((todo_id, cat_id)) = path?;
    let message = state.categories().attach_category(todo_id, cat_id, user.id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /todo/:todo_id/category/:cat_id
pub async fn detach_category(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path((todo_id, cat_id)) = path?;
    let message = state.categories().detach_category(todo_id, cat_id, user.id).await?;
    Ok(Json(MessageResponse::new(message)))
}
