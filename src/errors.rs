use std::io;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error taxonomy for the wiki.
///
/// `NotFound` doubles as a signal: on the view path it triggers the
/// redirect-to-edit flow instead of producing a response directly.
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    InvalidPath,
    Render(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            WikiError::InvalidPath => (StatusCode::NOT_FOUND, "Not found").into_response(),
            WikiError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
            WikiError::Render(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Render error: {}", e),
            )
                .into_response(),
        }
    }
}
