//! Velvet Bean server - catalog, admin, and order API backend.
//!
//! Serves the public catalog and checkout endpoints together with the admin
//! product API, against either an embedded SQLite file (local) or a
//! networked `PostgreSQL` pool (`DATABASE_URL` present).

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use velvet_bean_server::config::AppConfig;
use velvet_bean_server::db::schema;
use velvet_bean_server::services::email::EmailService;
use velvet_bean_server::state::AppState;
use velvet_bean_server::store::{Backend, Store};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "velvet_bean_server=info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Pools are lazy: an unreachable store degrades individual requests
    // instead of aborting startup.
    let store = Store::connect(&config.database).expect("Failed to configure database");
    match store.backend() {
        Backend::Postgres => tracing::info!("connected to PostgreSQL database"),
        Backend::Sqlite => tracing::info!(
            path = %config.database.sqlite_path.display(),
            "using embedded SQLite database"
        ),
    }

    // Fire-and-forget against the store: a failed initialization leaves the
    // process serving requests that then fail individually.
    if let Err(err) = schema::initialize(&store).await {
        tracing::error!(error = %err, "database initialization failed");
    }

    let mailer = config.smtp.as_ref().and_then(|smtp| {
        match EmailService::new(smtp) {
            Ok(service) => {
                tracing::info!(host = %smtp.host, "SMTP service configured");
                Some(service)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to configure SMTP transport");
                None
            }
        }
    });
    if mailer.is_none() {
        tracing::warn!("SMTP not configured; order confirmation email disabled");
    }

    let state = AppState::new(store, mailer);
    let app = velvet_bean_server::app(state);

    let addr = config.socket_addr();
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
