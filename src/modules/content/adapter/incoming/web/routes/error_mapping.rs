use actix_web::HttpResponse;
use tracing::error;

use crate::content::application::domain::Resource;
use crate::content::application::ports::incoming::use_cases::ContentError;
use crate::shared::api::ApiResponse;

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

pub fn map_content_error<E: Resource>(err: ContentError) -> HttpResponse {
    match err {
        ContentError::NotFound { .. } => not_found::<E>(),
        ContentError::Conflict(message) => {
            ApiResponse::bad_request(&format!("{}_CONFLICT", E::CODE), &message)
        }
        ContentError::StorageFailure(detail) => {
            error!(resource = E::PATH, "request failed: {}", detail);
            ApiResponse::internal_error()
        }
    }
}

pub fn not_found<E: Resource>() -> HttpResponse {
    ApiResponse::not_found(
        &format!("{}_NOT_FOUND", E::CODE),
        &format!("{} not found", E::LABEL),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};
    use serde_json::Value;

    use crate::content::application::domain::{BlogPost, Skill};

    async fn body_of(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn not_found_uses_resource_code() {
        let resp = map_content_error::<Skill>(ContentError::NotFound { resource: "Skill" });
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_of(resp).await;
        assert_eq!(body["error"]["code"], "SKILL_NOT_FOUND");
        assert_eq!(body["error"]["message"], "Skill not found");
    }

    #[actix_web::test]
    async fn conflict_is_bad_request() {
        let resp = map_content_error::<BlogPost>(ContentError::Conflict(
            "Blog post with slug 'a' already exists".to_string(),
        ));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_of(resp).await;
        assert_eq!(body["error"]["code"], "BLOG_POST_CONFLICT");
    }

    #[actix_web::test]
    async fn storage_failure_hides_details() {
        let resp = map_content_error::<Skill>(ContentError::StorageFailure(
            "password authentication failed".to_string(),
        ));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("password"));
    }
}
