use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation(reason.into())
    }
}

/// Validation failures carry their reason to the caller; everything else is
/// logged with detail and surfaced as an opaque 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": reason })),
            )
                .into_response(),
            err => {
                tracing::error!("request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
