pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::content;

use crate::config::{AppConfig, StorageBackend};
use crate::content::adapter::incoming::web::routes::{configure_collection, configure_singleton};
use crate::content::adapter::outgoing::{
    InMemoryCollectionRepository, InMemorySingletonRepository, InMemoryStorageProbe,
    PostgresCollectionRepository, PostgresSingletonRepository, PostgresStorageProbe,
};
use crate::content::application::domain::{
    About, BlogPost, CollectionResource, Education, Project, Settings, SingletonResource, Skill,
    SocialLink, UserInfo, WorkExperience,
};
use crate::content::application::ports::incoming::use_cases::{
    CollectionUseCases, SingletonUseCases,
};
use crate::content::application::ports::outgoing::StorageProbe;
use crate::content::application::services::{CollectionService, SingletonService};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn CollectionUseCases<Project>>,
    pub blog_posts: Arc<dyn CollectionUseCases<BlogPost>>,
    pub social_links: Arc<dyn CollectionUseCases<SocialLink>>,
    pub work_experiences: Arc<dyn CollectionUseCases<WorkExperience>>,
    pub education: Arc<dyn CollectionUseCases<Education>>,
    pub skills: Arc<dyn CollectionUseCases<Skill>>,
    pub user_info: Arc<dyn SingletonUseCases<UserInfo>>,
    pub settings: Arc<dyn SingletonUseCases<Settings>>,
    pub about: Arc<dyn SingletonUseCases<About>>,
    pub storage_probe: Arc<dyn StorageProbe>,
}

impl AppState {
    pub fn in_memory() -> Self {
        fn collection<E: CollectionResource>() -> Arc<dyn CollectionUseCases<E>> {
            Arc::new(CollectionService::new(InMemoryCollectionRepository::<E>::new()))
        }

        fn singleton<E: SingletonResource>() -> Arc<dyn SingletonUseCases<E>> {
            Arc::new(SingletonService::new(InMemorySingletonRepository::<E>::new()))
        }

        Self {
            projects: collection(),
            blog_posts: collection(),
            social_links: collection(),
            work_experiences: collection(),
            education: collection(),
            skills: collection(),
            user_info: singleton(),
            settings: singleton(),
            about: singleton(),
            storage_probe: Arc::new(InMemoryStorageProbe),
        }
    }

    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        fn collection<E: CollectionResource>(
            db: &Arc<DatabaseConnection>,
        ) -> Arc<dyn CollectionUseCases<E>> {
            Arc::new(CollectionService::new(
                PostgresCollectionRepository::<E>::new(Arc::clone(db)),
            ))
        }

        fn singleton<E: SingletonResource>(
            db: &Arc<DatabaseConnection>,
        ) -> Arc<dyn SingletonUseCases<E>> {
            Arc::new(SingletonService::new(
                PostgresSingletonRepository::<E>::new(Arc::clone(db)),
            ))
        }

        Self {
            projects: collection(&db),
            blog_posts: collection(&db),
            social_links: collection(&db),
            work_experiences: collection(&db),
            education: collection(&db),
            skills: collection(&db),
            user_info: singleton(&db),
            settings: singleton(&db),
            about: singleton(&db),
            storage_probe: Arc::new(PostgresStorageProbe::new(db)),
        }
    }
}

async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&conn, None)
        .await
        .context("Failed to run migrations")?;

    Ok(conn)
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let state = match &config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage; content is lost on restart");
            AppState::in_memory()
        }
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let conn = connect(database_url, *max_connections).await?;
            info!("Connected to Postgres");
            AppState::postgres(Arc::new(conn))
        }
    };

    let server_url = config.server_url();
    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(shared::api::custom_json_config())
            .configure(|cfg| init_routes(cfg, &state))
    })
    .bind(&server_url)
    .with_context(|| format!("Failed to bind {server_url}"))?
    .run()
    .await?;

    Ok(())
}

fn init_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Docs
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", crate::api::ApiDoc::openapi()),
    );
    // Collections
    configure_collection(cfg, Arc::clone(&state.projects));
    configure_collection(cfg, Arc::clone(&state.blog_posts));
    configure_collection(cfg, Arc::clone(&state.social_links));
    configure_collection(cfg, Arc::clone(&state.work_experiences));
    configure_collection(cfg, Arc::clone(&state.education));
    configure_collection(cfg, Arc::clone(&state.skills));
    // Singletons
    configure_singleton(cfg, Arc::clone(&state.user_info));
    configure_singleton(cfg, Arc::clone(&state.settings));
    configure_singleton(cfg, Arc::clone(&state.about));
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
