use anyhow::Result;
use course_market::{
    config::{AppConfig, RunMode},
    invoke::{self, Event},
    routes, seed,
    services::{AppState, clerk_service::ClerkClient, course_service::CourseService},
};
use std::{fs, io::ErrorKind, path::Path};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + run mode ---
    let (cfg, mode) = AppConfig::from_env_and_args()?;
    tracing::info!("Starting course-market with config: {:?}", redacted(&cfg));

    // --- Initialize SQLite connection ---
    let db_path = cfg
        .database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("file:");
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created missing directory {:?}", parent);
        }
    }

    // --- Initialize services ---
    let db = CourseService::connect(&cfg.database_url).await?;
    let courses = CourseService::new(db);
    courses.migrate().await?;

    if cfg.clerk_secret_key.is_empty() {
        tracing::warn!("CLERK_SECRET_KEY is unset; metadata updates will be rejected upstream");
    }
    let clerk = ClerkClient::new(cfg.clerk_secret_key.clone(), cfg.clerk_api_url.clone());

    let state = AppState {
        courses: courses.clone(),
        clerk,
    };

    match mode {
        // --- Administrative seed, no HTTP involved ---
        RunMode::Seed => {
            seed::seed(&courses).await?;
            tracing::info!("Database seeding complete.");
            Ok(())
        }

        // --- One event in, one response out ---
        RunMode::Invoke(payload) => {
            let event: Event = serde_json::from_str(&payload)?;
            let app = routes::routes(state);
            let response = invoke::handle_event(event, app, &courses).await?;
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }

        // --- Long-lived listener ---
        RunMode::Serve => {
            let app = routes::routes(state);

            let addr = cfg.addr();
            let listener = match TcpListener::bind(&addr).await {
                Ok(listener) => listener,
                Err(err)
                    if err.kind() == ErrorKind::PermissionDenied
                        && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
                {
                    let fallback_addr = format!("127.0.0.1:{}", cfg.port);
                    tracing::warn!(
                        "Permission denied binding to {} ({}). Falling back to {}",
                        addr,
                        err,
                        fallback_addr
                    );
                    TcpListener::bind(&fallback_addr).await?
                }
                Err(err) => return Err(err.into()),
            };

            tracing::info!("Server listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

/// Config view safe to log (the identity-service key stays out).
fn redacted(cfg: &AppConfig) -> AppConfig {
    let mut cfg = cfg.clone();
    if !cfg.clerk_secret_key.is_empty() {
        cfg.clerk_secret_key = "***".into();
    }
    cfg
}
