use utoipa::openapi::path::{HttpMethod, OperationBuilder};
use utoipa::openapi::response::Response;
use utoipa::OpenApi;

use crate::api::schemas::{ErrorDetail, ErrorResponse};
use crate::content::application::domain::settings::{
    ContactFormSettings, NewsletterSettings, ThemeSettings,
};
use crate::content::application::domain::{
    About, BlogPost, Education, Project, ProjectStatus, Resource, Settings, Skill, SocialLink,
    UserInfo, WorkExperience,
};
use crate::content::application::schema::FieldViolation;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio CMS API",
        version = "1.0.0",
        description = "API documentation for Portfolio Content Management System",
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ErrorDetail,
            FieldViolation,

            // Collections
            Project,
            ProjectStatus,
            BlogPost,
            SocialLink,
            WorkExperience,
            Education,
            Skill,

            // Singletons
            UserInfo,
            Settings,
            About,

            // Settings sub-documents
            NewsletterSettings,
            ContactFormSettings,
            ThemeSettings
        )
    ),
    modifiers(&ResourcePaths),
    tags(
        (name = "projects", description = "Portfolio projects"),
        (name = "blog-posts", description = "Blog posts"),
        (name = "social-links", description = "Social profile links"),
        (name = "work-experiences", description = "Work history"),
        (name = "education", description = "Education history"),
        (name = "skills", description = "Skills"),
        (name = "user-info", description = "Owner profile (singleton)"),
        (name = "settings", description = "Site settings (singleton)"),
        (name = "about", description = "About page content (singleton)"),
    )
)]
pub struct ApiDoc;

const COLLECTIONS: &[(&str, &str)] = &[
    (Project::PATH, Project::LABEL),
    (BlogPost::PATH, BlogPost::LABEL),
    (SocialLink::PATH, SocialLink::LABEL),
    (WorkExperience::PATH, WorkExperience::LABEL),
    (Education::PATH, Education::LABEL),
    (Skill::PATH, Skill::LABEL),
];

const SINGLETONS: &[(&str, &str)] = &[
    (UserInfo::PATH, UserInfo::LABEL),
    (Settings::PATH, Settings::LABEL),
    (About::PATH, About::LABEL),
];

/// The content routes are generic over the resource type, so their
/// operations are described here instead of through `#[utoipa::path]`.
struct ResourcePaths;

impl utoipa::Modify for ResourcePaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for (path, label) in COLLECTIONS {
            let base = format!("/api/{path}");
            let item = format!("/api/{path}/{{id}}");

            let ops = [
                (base.as_str(), HttpMethod::Get, format!("List {label} rows"), "200"),
                (base.as_str(), HttpMethod::Post, format!("Create a {label}"), "201"),
                (item.as_str(), HttpMethod::Get, format!("Get a {label} by id"), "200"),
                (item.as_str(), HttpMethod::Put, format!("Update a {label}"), "200"),
                (item.as_str(), HttpMethod::Delete, format!("Delete a {label}"), "204"),
            ];
            for (route, method, summary, status) in ops {
                add_operation(openapi, route, method, path, summary, status);
            }
        }

        for (path, label) in SINGLETONS {
            let base = format!("/api/{path}");
            let item = format!("/api/{path}/{{id}}");

            let ops = [
                (base.as_str(), HttpMethod::Get, format!("Get the {label} (null when unset)"), "200"),
                (base.as_str(), HttpMethod::Post, format!("Create the {label}"), "201"),
                (item.as_str(), HttpMethod::Put, format!("Update the {label}"), "200"),
            ];
            for (route, method, summary, status) in ops {
                add_operation(openapi, route, method, path, summary, status);
            }
        }
    }
}

fn add_operation(
    openapi: &mut utoipa::openapi::OpenApi,
    route: &str,
    method: HttpMethod,
    tag: &str,
    summary: String,
    status: &str,
) {
    let operation = OperationBuilder::new()
        .tag(tag)
        .summary(Some(summary))
        .response(status, Response::new("Success"))
        .response("400", Response::new("Validation error or conflict"))
        .response("404", Response::new("Not found"))
        .response("500", Response::new("Internal error"))
        .build();

    openapi
        .paths
        .add_path_operation(route, vec![method], operation);
}
