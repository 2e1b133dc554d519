use crate::io_struct::ErrorBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

/// Errors surfaced at the HTTP boundary. The message is what the client
/// sees; underlying causes are logged, never echoed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Empty prompt")]
    EmptyPrompt,

    #[error("Failed to process request")]
    Processing,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyPrompt | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Processing => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
