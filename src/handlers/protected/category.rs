use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::database::models::{Category, CreateCategory, Todo};
use crate::middleware::response::created;
use crate::middleware::{ApiResult, ValidatedUser};
use crate::state::AppState;

/// POST /category - create a category owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    body: Result<Json<CreateCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(body) = body?;
    let category = state.categories().create_category(&body.text, user.id).await?;
    Ok(created(category))
}

/// GET /category/:cat_id/todos - todos tagged with one of the caller's categories
pub async fn todos(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Todo>>> {
    let Path(cat_id) = path?;
    let todos = state.categories().list_todos_for_category(cat_id, user.id).await?;
    Ok(Json(todos))
}
