use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{ERR_BAD_ADMIN_PASSWORD, ERR_DEVICE_CONFLICT, ERR_GUEST_NOT_FOUND};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Database open error: {0}")]
    DatabaseOpen(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload provider error: {0}")]
    UploadProvider(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown action")]
    UnknownAction(&'static str),

    #[error("Guest not found")]
    GuestNotFound,

    #[error("Invite already opened on another device")]
    DeviceConflict,

    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnknownAction(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            AppError::Multipart(e) => (e.status(), e.body_text()),
            AppError::GuestNotFound => (StatusCode::UNAUTHORIZED, ERR_GUEST_NOT_FOUND.to_string()),
            AppError::DeviceConflict => (StatusCode::FORBIDDEN, ERR_DEVICE_CONFLICT.to_string()),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, ERR_BAD_ADMIN_PASSWORD.to_string())
            }
            internal => {
                tracing::error!("{:?}", internal);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Erro no servidor: {}", internal),
                )
            }
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "status": "error",
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::UnknownAction("?"), StatusCode::BAD_REQUEST),
            (AppError::GuestNotFound, StatusCode::UNAUTHORIZED),
            (AppError::DeviceConflict, StatusCode::FORBIDDEN),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AppError::UploadProvider("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_and_message().0, expected);
        }
    }

    #[test]
    fn test_internal_message_passthrough() {
        let (_, message) = AppError::UploadProvider("quota exceeded".into()).status_and_message();
        assert!(message.starts_with("Erro no servidor"));
        assert!(message.contains("quota exceeded"));
    }
}
