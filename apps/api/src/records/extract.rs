use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections render as `AppError` (400 with an `error` body).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
