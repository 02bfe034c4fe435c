use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub production: bool,
    pub database_url: String,
    pub clerk_secret_key: String,
    pub clerk_api_url: String,
}

/// What `main` should do after configuration is resolved.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Bind a TCP listener and serve until stopped.
    Serve,
    /// Seed the database with fixture courses and exit.
    Seed,
    /// Handle a single invocation event (JSON payload) and exit.
    Invoke(String),
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Course marketplace API")]
pub struct Args {
    /// Host to bind to (overrides COURSE_MARKET_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides COURSE_MARKET_PORT / PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides COURSE_MARKET_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Seed the database with fixture courses and exit
    #[arg(long)]
    pub seed: bool,

    /// Handle one invocation event (JSON) instead of listening
    #[arg(long, value_name = "JSON")]
    pub event: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and a run mode.
    pub fn from_env_and_args() -> Result<(Self, RunMode)> {
        let args = Args::parse();
        let cfg = Self::from_env(args.host, args.port, args.database_url)?;

        let mode = if args.seed {
            RunMode::Seed
        } else if let Some(event) = args.event {
            RunMode::Invoke(event)
        } else {
            RunMode::Serve
        };

        Ok((cfg, mode))
    }

    /// Resolve configuration from the environment, with optional overrides.
    pub fn from_env(
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
    ) -> Result<Self> {
        let env_host = env::var("COURSE_MARKET_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        // COURSE_MARKET_PORT wins over the conventional PORT variable.
        let env_port = match env::var("COURSE_MARKET_PORT").or_else(|_| env::var("PORT")) {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing port value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading COURSE_MARKET_PORT"),
        };

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        // Non-production runs against a local file; production points at the
        // managed database unless overridden.
        let env_db = env::var("COURSE_MARKET_DATABASE_URL").unwrap_or_else(|_| {
            if production {
                "sqlite:///var/lib/course-market/course_market.db".into()
            } else {
                "sqlite://./data/course_market.db".into()
            }
        });

        let clerk_secret_key = env::var("CLERK_SECRET_KEY").unwrap_or_default();
        let clerk_api_url =
            env::var("CLERK_API_URL").unwrap_or_else(|_| "https://api.clerk.com/v1".into());

        Ok(Self {
            host: host.unwrap_or(env_host),
            port: port.unwrap_or(env_port),
            production,
            database_url: database_url.unwrap_or(env_db),
            clerk_secret_key,
            clerk_api_url,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
