use axum::extract::FromRequest;

use crate::errors::AppError;

/// Request-body extractor. Same as `axum::Json`, but malformed or
/// mistyped bodies are rejected with the `AppError` JSON body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
