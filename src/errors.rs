use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unsupported intent: {0}")]
    UnsupportedIntent(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("queue error: {0}")]
    Queue(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnsupportedIntent(_) | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Queue(_) => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
