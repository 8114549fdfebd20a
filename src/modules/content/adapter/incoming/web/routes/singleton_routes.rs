use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::error_mapping::map_content_error;
use crate::{
    content::application::{
        domain::SingletonResource,
        ports::incoming::use_cases::SingletonUseCases,
        schema::{Draft, Patch},
    },
    shared::api::ApiResponse,
};

/// Mounts get/create/update under `/api/<path>`. Singletons have no delete.
pub fn configure_singleton<E: SingletonResource>(
    cfg: &mut web::ServiceConfig,
    use_cases: Arc<dyn SingletonUseCases<E>>,
) {
    cfg.service(
        web::scope(&format!("/api/{}", E::PATH))
            .app_data(web::Data::from(use_cases))
            .route("", web::get().to(get_handler::<E>))
            .route("", web::post().to(create_handler::<E>))
            .route("/{id}", web::put().to(update_handler::<E>)),
    );
}

/// Absent singletons answer 200 with `"data": null`.
async fn get_handler<E: SingletonResource>(
    use_cases: web::Data<dyn SingletonUseCases<E>>,
) -> HttpResponse {
    match use_cases.get().await {
        Ok(row) => ApiResponse::success(row),
        Err(err) => map_content_error::<E>(err),
    }
}

async fn create_handler<E: SingletonResource>(
    use_cases: web::Data<dyn SingletonUseCases<E>>,
    payload: web::Json<Value>,
) -> HttpResponse {
    let draft = match Draft::<E>::parse(payload.into_inner()) {
        Ok(draft) => draft,
        Err(errors) => return ApiResponse::validation_failed(&errors),
    };

    match use_cases.create(draft).await {
        Ok(entity) => ApiResponse::created(entity),
        Err(err) => map_content_error::<E>(err),
    }
}

// The path id is accepted for URL symmetry with collections and ignored.
async fn update_handler<E: SingletonResource>(
    use_cases: web::Data<dyn SingletonUseCases<E>>,
    _id: web::Path<String>,
    payload: web::Json<Value>,
) -> HttpResponse {
    let patch = match Patch::<E>::parse(payload.into_inner()) {
        Ok(patch) => patch,
        Err(errors) => return ApiResponse::validation_failed(&errors),
    };

    match use_cases.update(patch).await {
        Ok(entity) => ApiResponse::success(entity),
        Err(err) => map_content_error::<E>(err),
    }
}
