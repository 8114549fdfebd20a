use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

use super::error_mapping::{map_content_error, not_found};
use crate::{
    content::application::{
        domain::CollectionResource,
        ports::incoming::use_cases::CollectionUseCases,
        schema::{Draft, Patch},
    },
    shared::api::ApiResponse,
};

//
// ──────────────────────────────────────────────────────────
// Registration
// ──────────────────────────────────────────────────────────
//

/// Mounts the five collection routes under `/api/<path>`.
pub fn configure_collection<E: CollectionResource>(
    cfg: &mut web::ServiceConfig,
    use_cases: Arc<dyn CollectionUseCases<E>>,
) {
    cfg.service(
        web::scope(&format!("/api/{}", E::PATH))
            .app_data(web::Data::from(use_cases))
            .route("", web::get().to(list_handler::<E>))
            .route("", web::post().to(create_handler::<E>))
            .route("/{id}", web::get().to(get_handler::<E>))
            .route("/{id}", web::put().to(update_handler::<E>))
            .route("/{id}", web::delete().to(delete_handler::<E>)),
    );
}

//
// ──────────────────────────────────────────────────────────
// Routes
// ──────────────────────────────────────────────────────────
//

async fn list_handler<E: CollectionResource>(
    use_cases: web::Data<dyn CollectionUseCases<E>>,
) -> HttpResponse {
    match use_cases.list().await {
        Ok(rows) => ApiResponse::success(rows),
        Err(err) => map_content_error::<E>(err),
    }
}

async fn get_handler<E: CollectionResource>(
    use_cases: web::Data<dyn CollectionUseCases<E>>,
    path: web::Path<String>,
) -> HttpResponse {
    let Ok(id) = Uuid::parse_str(&path) else {
        return not_found::<E>();
    };

    match use_cases.get(id).await {
        Ok(entity) => ApiResponse::success(entity),
        Err(err) => map_content_error::<E>(err),
    }
}

async fn create_handler<E: CollectionResource>(
    use_cases: web::Data<dyn CollectionUseCases<E>>,
    payload: web::Json<Value>,
) -> HttpResponse {
    // 1️⃣ Validate (defaults filled, unknown keys rejected)
    let draft = match Draft::<E>::parse(payload.into_inner()) {
        Ok(draft) => draft,
        Err(errors) => return ApiResponse::validation_failed(&errors),
    };

    // 2️⃣ Execute use case
    match use_cases.create(draft).await {
        Ok(entity) => ApiResponse::created(entity),
        Err(err) => map_content_error::<E>(err),
    }
}

async fn update_handler<E: CollectionResource>(
    use_cases: web::Data<dyn CollectionUseCases<E>>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> HttpResponse {
    let Ok(id) = Uuid::parse_str(&path) else {
        return not_found::<E>();
    };

    let patch = match Patch::<E>::parse(payload.into_inner()) {
        Ok(patch) => patch,
        Err(errors) => return ApiResponse::validation_failed(&errors),
    };

    match use_cases.update(id, patch).await {
        Ok(entity) => ApiResponse::success(entity),
        Err(err) => map_content_error::<E>(err),
    }
}

async fn delete_handler<E: CollectionResource>(
    use_cases: web::Data<dyn CollectionUseCases<E>>,
    path: web::Path<String>,
) -> HttpResponse {
    let Ok(id) = Uuid::parse_str(&path) else {
        return not_found::<E>();
    };

    match use_cases.delete(id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => map_content_error::<E>(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::json;

    use crate::content::adapter::outgoing::InMemoryCollectionRepository;
    use crate::content::application::domain::{BlogPost, Project, Skill};
    use crate::content::application::ports::incoming::use_cases::ContentError;
    use crate::content::application::services::CollectionService;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::fixtures::{blog_post_payload, project_payload, skill_payload};

    // ============================================================
    // Failing Use Case Mock
    // ============================================================

    struct BrokenSkillUseCases;

    #[async_trait]
    impl CollectionUseCases<Skill> for BrokenSkillUseCases {
        async fn list(&self) -> Result<Vec<Skill>, ContentError> {
            Err(ContentError::StorageFailure("disk full".to_string()))
        }

        async fn get(&self, _id: Uuid) -> Result<Skill, ContentError> {
            Err(ContentError::StorageFailure("disk full".to_string()))
        }

        async fn create(&self, _draft: Draft<Skill>) -> Result<Skill, ContentError> {
            Err(ContentError::StorageFailure("disk full".to_string()))
        }

        async fn update(&self, _id: Uuid, _patch: Patch<Skill>) -> Result<Skill, ContentError> {
            Err(ContentError::StorageFailure("disk full".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), ContentError> {
            Err(ContentError::StorageFailure("disk full".to_string()))
        }
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn in_memory<E: CollectionResource>() -> Arc<dyn CollectionUseCases<E>> {
        Arc::new(CollectionService::new(
            InMemoryCollectionRepository::<E>::new(),
        ))
    }

    async fn read_json(resp: actix_web::dev::ServiceResponse) -> Value {
        let body = test::read_body(resp).await;
        serde_json::from_slice(&body).unwrap()
    }

    macro_rules! app_for {
        ($entity:ty, $use_cases:expr) => {
            test::init_service(
                App::new()
                    .app_data(custom_json_config())
                    .configure(|cfg| configure_collection::<$entity>(cfg, $use_cases)),
            )
            .await
        };
    }

    // ============================================================
    // Tests
    // ============================================================

    #[actix_web::test]
    async fn create_then_get_round_trips() {
        let app = app_for!(Project, in_memory::<Project>());

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(project_payload("Portfolio", Some(1)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created = read_json(resp).await;
        assert_eq!(created["success"], true);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["status"], "published");
        assert_eq!(created["data"]["featured"], false);
        assert!(created["data"]["createdAt"].is_string());

        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let fetched = read_json(resp).await;
        assert_eq!(fetched["data"], created["data"]);
    }

    #[actix_web::test]
    async fn empty_collection_lists_as_empty_array() {
        let app = app_for!(Skill, in_memory::<Skill>());

        let req = test::TestRequest::get().uri("/api/skills").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn create_missing_required_field_is_rejected_with_field_reasons() {
        let app = app_for!(Project, in_memory::<Project>());

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({ "title": "Only a title" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = read_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"description"));
        assert!(fields.contains(&"category"));

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn partial_update_leaves_other_fields() {
        let app = app_for!(Project, in_memory::<Project>());

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(project_payload("Portfolio", Some(3)))
            .to_request();
        let created = read_json(test::call_service(&app, req).await).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/projects/{id}"))
            .set_json(json!({ "description": "Rewritten" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let updated = read_json(resp).await;
        assert_eq!(updated["data"]["description"], "Rewritten");
        assert_eq!(updated["data"]["title"], created["data"]["title"]);
        assert_eq!(updated["data"]["technologies"], created["data"]["technologies"]);
        assert_eq!(updated["data"]["order"], 3);
    }

    #[actix_web::test]
    async fn update_with_taken_slug_is_conflict() {
        let app = app_for!(BlogPost, in_memory::<BlogPost>());

        for slug in ["first", "second"] {
            let req = test::TestRequest::post()
                .uri("/api/blog-posts")
                .set_json(blog_post_payload(slug))
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::CREATED
            );
        }

        let req = test::TestRequest::get().uri("/api/blog-posts").to_request();
        let listed = read_json(test::call_service(&app, req).await).await;
        let second = listed["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["slug"] == "second")
            .unwrap()
            .clone();

        let req = test::TestRequest::put()
            .uri(&format!("/api/blog-posts/{}", second["id"].as_str().unwrap()))
            .set_json(json!({ "slug": "first" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = read_json(resp).await;
        assert_eq!(body["error"]["code"], "BLOG_POST_CONFLICT");

        let req = test::TestRequest::get()
            .uri(&format!("/api/blog-posts/{}", second["id"].as_str().unwrap()))
            .to_request();
        let fetched = read_json(test::call_service(&app, req).await).await;
        assert_eq!(fetched["data"], second);
    }

    #[actix_web::test]
    async fn delete_then_get_and_delete_again_are_not_found() {
        let app = app_for!(Skill, in_memory::<Skill>());

        let req = test::TestRequest::post()
            .uri("/api/skills")
            .set_json(skill_payload("Rust", 1))
            .to_request();
        let created = read_json(test::call_service(&app, req).await).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/skills/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/skills/{id}"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/skills/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(resp).await["error"]["code"], "SKILL_NOT_FOUND");
    }

    #[actix_web::test]
    async fn malformed_id_is_not_found() {
        let app = app_for!(Skill, in_memory::<Skill>());

        let req = test::TestRequest::get()
            .uri("/api/skills/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unparsable_body_is_validation_error() {
        let app = app_for!(Skill, in_memory::<Skill>());

        let req = test::TestRequest::post()
            .uri("/api/skills")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"title\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn storage_failure_is_internal_error() {
        let use_cases: Arc<dyn CollectionUseCases<Skill>> = Arc::new(BrokenSkillUseCases);
        let app = app_for!(Skill, use_cases);

        let req = test::TestRequest::get().uri("/api/skills").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("disk full"));
    }
}
