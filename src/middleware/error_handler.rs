// Extractor error handlers: malformed bodies, queries and paths get the same
// `{"success": false, "error": {...}}` envelope as service errors.

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    Error, HttpRequest,
};

use crate::core::AppError;

/// `JsonConfig` error handler
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected request body");

    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid request body: {}", other),
    };

    AppError::Validation(message).into()
}

/// `QueryConfig` error handler
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");
    AppError::Validation(format!("Invalid query parameters: {}", err)).into()
}

/// `PathConfig` error handler
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected path");
    AppError::Validation(format!("Invalid path: {}", err)).into()
}
