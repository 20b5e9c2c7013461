use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Handler result: a bare JSON body on success, an `ApiError` body on failure.
pub type ApiResult<T> = Result<T, crate::error::ApiError>;

/// 201 Created with the resource as the body
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Body of the attach/detach confirmations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
