//! Itemhub Server
//!
//! Serves the item CRUD API backed by PostgreSQL, SQLite, or an in-memory
//! store when no database is configured.

use anyhow::{Context, Result};
use itemhub_server::config::Settings;
use itemhub_server::router::build_router;
use itemhub_server::storage;
use itemhub_server::AppState;
use std::any::Any;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    // Panics inside request tasks are logged, not printed
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        error!(%location, "PANIC: {}", panic_message(info.payload()));
    }));

    info!("Starting Itemhub Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;

    let storage = storage::select(settings.database_url())
        .context("Failed to configure item storage")?;
    info!("Storage mode: {}", storage.mode);

    // Fire-and-forget; requests are accepted before the table exists
    storage.spawn_schema_init();

    let static_dir = if settings.static_dir.is_dir() {
        info!("Static files directory: {}", settings.static_dir.display());
        Some(settings.static_dir.as_path())
    } else {
        warn!(
            "Static files directory {} not found, serving API only",
            settings.static_dir.display()
        );
        None
    };

    let app = build_router(AppState::from(storage), static_dir);

    let listener = tokio::net::TcpListener::bind((settings.bind_host.as_str(), settings.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind to {}:{}",
                settings.bind_host, settings.port
            )
        })?;
    info!("Backend listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "Unknown panic"
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(format!("item {}", 7));
        assert_eq!(panic_message(payload.as_ref()), "item 7");

        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
