//! Shared response envelope types for API handlers.
//!
//! All API responses use the `{ "success": true, "data": ... }` envelope the
//! dashboard expects. Use [`ApiResponse::ok`] instead of ad-hoc
//! `serde_json::json!` to get compile-time type safety and consistent
//! serialization; error responses are produced by `error::AppError`.

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
