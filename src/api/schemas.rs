// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

use crate::content::application::schema::FieldViolation;

/// Standard error response wrapper
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    /// Error details
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[schema(example = "BLOG_POST_CONFLICT")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "Blog post with slug 'hello-world' already exists")]
    pub message: String,

    /// Per-field reasons, only on `VALIDATION_ERROR`
    pub fields: Option<Vec<FieldViolation>>,
}
