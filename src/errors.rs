use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use derive_more::Display;
use validator::ValidationError;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("{_0}")]
    Validation(String),

    #[display("{_0}")]
    BadRequest(String),

    #[display("Missing or invalid credentials")]
    Unauthorized,

    #[display("{_0}")]
    NotFound(String),

    #[display("Too many requests. Please wait a minute before trying again.")]
    RateLimited { retry_after: u64 },

    #[display("{error}")]
    Delivery { error: String, details: Option<String> },

    #[display("Internal server error: {_0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Delivery { error, details: Some(details) } => {
                serde_json::json!({ "error": error, "details": details })
            }
            // never leak internal causes through the response body
            AppError::Internal(_) => {
                serde_json::json!({ "error": "Failed to process request. Please try again later." })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        let mut response = HttpResponse::build(self.status_code());
        response.insert_header(ContentType::json());
        if let AppError::RateLimited { retry_after } = self {
            response.insert_header((header::RETRY_AFTER, retry_after.to_string()));
        }
        response.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.into_owned())
            .unwrap_or_else(|| "Invalid value".to_string());
        AppError::Validation(message)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Failures of the on-disk message store. These never reach a client: the
/// store downgrades them to warnings and keeps serving.
#[derive(Debug, Display)]
pub enum StorageError {
    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    #[display("Malformed message file: {_0}")]
    Serde(serde_json::Error),
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err)
    }
}

#[derive(Debug, Display)]
pub enum DeliveryError {
    #[display("Email service not configured")]
    NotConfigured,

    #[display("Email transport failed: {_0}")]
    Transport(String),

    #[display("Email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl std::error::Error for DeliveryError {}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(err.to_string())
    }
}
