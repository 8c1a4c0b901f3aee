use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleetlens_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every failure is expressed as a [`CoreError`]; database errors are
/// classified into that taxonomy on conversion. Implements
/// [`IntoResponse`] to produce the uniform
/// `{ success: false, error, details }` JSON envelope.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AppError(#[from] CoreError);

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Classify a sqlx error into the domain taxonomy.
///
/// Pool exhaustion (acquire deadline exceeded) becomes a connection
/// timeout; everything else is a query failure carrying the driver message.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self(CoreError::ConnectionTimeout(
                "timed out waiting for a database connection".to_string(),
            )),
            other => Self(CoreError::QueryFailure(other.to_string())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self.0 {
            CoreError::InvalidParameter(msg) => (
                StatusCode::BAD_REQUEST,
                "Invalid parameter".to_string(),
                Some(msg.clone()),
            ),
            CoreError::ConnectionTimeout(msg) => {
                tracing::error!(error = %msg, "Connection timeout");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Connection timeout".to_string(),
                    Some(msg.clone()),
                )
            }
            CoreError::QueryFailure(msg) => {
                tracing::error!(error = %msg, "Query failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch analytics data".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": message,
            "details": details,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_exhaustion_classifies_as_connection_timeout() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_matches!(err.0, CoreError::ConnectionTimeout(_));
    }

    #[test]
    fn other_database_errors_classify_as_query_failure() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_matches!(err.0, CoreError::QueryFailure(_));
    }
}
