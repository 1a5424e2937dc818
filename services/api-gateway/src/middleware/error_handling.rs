use axum::{
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use specmatch_utils::{ErrorResponse, SpecMatchError};

/// JSON error body with the HTTP status derived from the error kind
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(message, "VALIDATION_ERROR"),
        }
    }
    
    /// Pipeline failure, worded for the person who uploaded the files
    pub fn processing_failed(error: &SpecMatchError) -> Self {
        Self {
            status: StatusCode::from_u16(error.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: ErrorResponse::new(
                format!("Processing failed: {}. Please check file formats and content.", error),
                error.error_code(),
            ),
        }
    }
}

impl From<SpecMatchError> for ApiError {
    fn from(error: SpecMatchError) -> Self {
        Self {
            status: StatusCode::from_u16(error.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: error.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub async fn error_handling_middleware(
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    
    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status = %response.status(), "Request failed");
    }
    response
}
