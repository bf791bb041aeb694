use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use student_api_rust::auth::TokenValidator;
use student_api_rust::config::{AppConfig, LogFormat};
use student_api_rust::database::{DatabaseManager, MemoryStudentStore, PgStudentStore, StudentStore};
use student_api_rust::services::StudentService;
use student_api_rust::{app, AppState};

#[derive(Parser)]
#[command(name = "student-api")]
#[command(about = "Student record API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Interface to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides STUDENT_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Use the in-memory store even when DATABASE_URL is set")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(config.logging.format);
    config.validate()?;
    tracing::info!(environment = ?config.environment, "Starting student API");

    let store: Arc<dyn StudentStore> = match (&config.database.url, args.memory) {
        (Some(_), false) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            tracing::info!("Connected to PostgreSQL");
            Arc::new(PgStudentStore::new(pool))
        }
        (Some(_), true) => {
            tracing::warn!("--memory given, ignoring DATABASE_URL; records are kept in memory only");
            Arc::new(MemoryStudentStore::new())
        }
        (None, _) => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let students = StudentService::new(store, config.api.request_timeout());
    let validator = TokenValidator::new(&config.security)?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(address = %bind_addr, "Student API listening");

    let router = app(AppState::new(students, validator, config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Student API stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
