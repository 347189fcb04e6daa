//! # proready: Placement Preparation Backend
//!
//! `proready` is the REST backend for a placement-preparation tracker aimed at
//! engineering students. It tracks timed study sessions against curated and
//! custom resources, maintains daily streaks, aggregates per-period analytics,
//! and wraps a Gemini-shaped generative API for resume generation, notes
//! summarization, and preparation roadmaps.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the
//! HTTP layer and uses PostgreSQL for all persistence.
//!
//! The **API layer** ([`api`]) exposes the JSON surface under `/api/*`. All
//! endpoints except registration and login require a Bearer JWT issued by this
//! service.
//!
//! The **authentication layer** ([`auth`]) covers Argon2id password hashing,
//! JWT session tokens, and the extractor that resolves the caller from the
//! `Authorization` header.
//!
//! The **database layer** ([`db`]) uses the repository pattern: each table has
//! a repository over a `PgConnection` so handlers can compose repositories
//! inside one transaction (ending a session and advancing streaks commit
//! atomically).
//!
//! The **tracking module** ([`tracking`]) holds the pure domain logic: streak
//! day arithmetic and analytics aggregation, independent of the database.
//!
//! The **AI module** ([`ai`]) talks to a `generateContent`-style backend and
//! deals with the reality of model output: fenced JSON extraction, fallbacks
//! for resumes and notes, and hard 502s for roadmaps.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use proready::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = proready::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     proready::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod pdf;
pub mod telemetry;
pub mod tracking;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::ai::GenerativeClient;
use crate::config::CorsOrigin;
use crate::db::models::resources::ResourceCategory;
use axum::http::HeaderValue;
use axum::{
    Router, http,
    routing::{delete, get, post, put},
};
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub ai: GenerativeClient,
}

/// Get the proready database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// The platform-default resources every user sees.
fn default_resources() -> Vec<(&'static str, ResourceCategory, &'static str, &'static str)> {
    use ResourceCategory::{Development, Dsa, WebDev};
    vec![
        ("LeetCode", Dsa, "https://leetcode.com", "code"),
        ("GeeksforGeeks", Dsa, "https://geeksforgeeks.org", "book"),
        ("TakeUForward", Dsa, "https://takeuforward.org", "rocket"),
        ("Coding Ninjas", Dsa, "https://codingninjas.com", "swords"),
        ("HackerRank", Dsa, "https://hackerrank.com", "trophy"),
        ("YouTube", Development, "https://youtube.com", "video"),
        ("Udemy", Development, "https://udemy.com", "graduation-cap"),
        ("FreeCodeCamp", WebDev, "https://freecodecamp.org", "flame"),
    ]
}

/// Seed the database with the default resource catalog (runs only once).
///
/// The `resources_seeded` flag in `system_config` guards the seed so later
/// manual edits to the catalog survive restarts.
#[instrument(skip_all)]
pub async fn seed_default_resources(db: &PgPool) -> Result<(), anyhow::Error> {
    let mut tx = db.begin().await?;

    let seeded: Option<bool> = sqlx::query_scalar("SELECT value FROM system_config WHERE key = 'resources_seeded'")
        .fetch_optional(&mut *tx)
        .await?;

    if let Some(true) = seeded {
        debug!("Resource catalog already seeded, skipping");
        tx.commit().await?;
        return Ok(());
    }

    info!("Seeding default resource catalog");

    for (name, category, url, icon) in default_resources() {
        sqlx::query(
            "INSERT INTO resources (name, category, url, icon, is_custom, user_id)
             VALUES ($1, $2, $3, $4, false, NULL)
             ON CONFLICT DO NOTHING",
        )
        .bind(name)
        .bind(category)
        .bind(url)
        .bind(icon)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE system_config SET value = true, updated_at = now() WHERE key = 'resources_seeded'")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .expose_headers(vec![http::header::CONTENT_DISPOSITION]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Authentication
        .route("/auth/register", post(api::handlers::auth::register))
        .route("/auth/login", post(api::handlers::auth::login))
        .route("/auth/me", get(api::handlers::auth::me))
        // Study sessions
        .route("/sessions/start", post(api::handlers::sessions::start_session))
        .route("/sessions/end", put(api::handlers::sessions::end_session))
        .route("/sessions/active", get(api::handlers::sessions::active_session))
        .route("/sessions/analytics", get(api::handlers::sessions::analytics))
        .route("/sessions", get(api::handlers::sessions::list_sessions))
        // Resources
        .route("/resources", get(api::handlers::resources::list_resources))
        .route("/resources", post(api::handlers::resources::create_resource))
        .route("/resources/{id}", delete(api::handlers::resources::delete_resource))
        // Streaks
        .route("/streaks", get(api::handlers::streaks::get_streaks))
        // Generative endpoints
        .route("/ai/resume/generate", post(api::handlers::resumes::generate_resume))
        .route("/ai/resume", get(api::handlers::resumes::list_resumes))
        .route("/ai/resume/{id}/pdf", get(api::handlers::resumes::get_resume_pdf))
        .route("/ai/resume/{id}", delete(api::handlers::resumes::delete_resume))
        .route("/ai/notes/summarize", post(api::handlers::notes::summarize_notes))
        .route("/ai/notes", get(api::handlers::notes::list_notes))
        .route("/ai/notes/{id}", delete(api::handlers::notes::delete_note))
        .route("/ai/roadmap/generate", post(api::handlers::roadmaps::generate_roadmap))
        .route("/ai/roadmap", get(api::handlers::roadmaps::list_roadmaps))
        .route("/ai/roadmap/{id}", delete(api::handlers::roadmaps::delete_roadmap));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .with_state(state.clone());

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Connect the pool, run migrations, and seed the resource catalog
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool_settings = &config.database.pool;

    let mut options = PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .min_connections(pool_settings.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(pool_settings.acquire_timeout_secs));
    if pool_settings.idle_timeout_secs > 0 {
        options = options.idle_timeout(std::time::Duration::from_secs(pool_settings.idle_timeout_secs));
    }

    let pool = options.connect(&config.database.url).await?;
    migrator().run(&pool).await?;
    seed_default_resources(&pool).await?;

    Ok(pool)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations,
///    and seeds the resource catalog
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting proready with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;

        let ai = GenerativeClient::new(&config.ai)?;
        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
            ai,
        };

        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "proready listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::seed_default_resources;
    use sqlx::PgPool;

    #[test_log::test(sqlx::test)]
    async fn test_healthz(pool: PgPool) {
        let server = crate::test_utils::create_test_app(pool).await;

        let response = server.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[test_log::test(sqlx::test)]
    async fn test_seeding_is_idempotent(pool: PgPool) {
        seed_default_resources(&pool).await.unwrap();
        seed_default_resources(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE NOT is_custom")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 8);
    }

    #[test_log::test(sqlx::test)]
    async fn test_seed_respects_manual_catalog_edits(pool: PgPool) {
        seed_default_resources(&pool).await.unwrap();

        sqlx::query("DELETE FROM resources WHERE name = 'Udemy'")
            .execute(&pool)
            .await
            .unwrap();

        // A second seed must not resurrect the deleted default
        seed_default_resources(&pool).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE name = 'Udemy'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
