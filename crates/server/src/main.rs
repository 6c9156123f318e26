mod auth;
mod config;
mod error;
mod http;
mod pagination;
mod state;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::{NotifySettings, Settings};
use crate::http::router::build_router;
use crate::state::AppState;
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let db = Db::new(&settings.database.url).await?;

    let (tx_notify, rx_notify) = mpsc::channel(100);

    let notify_config = match settings.notify.clone() {
        NotifySettings::Log {
            batch_delay_secs,
            flush_interval_secs,
        } => notify::NotifyConfig {
            mailer: notify::MailerConfig::Log,
            public_base_url: settings.server.public_base_url.clone(),
            unsubscribe_secret: settings.security.unsubscribe_secret.clone(),
            batch_delay_secs,
            flush_interval_secs,
        },
        NotifySettings::Webhook {
            endpoint,
            batch_delay_secs,
            flush_interval_secs,
        } => notify::NotifyConfig {
            mailer: notify::MailerConfig::Webhook { endpoint },
            public_base_url: settings.server.public_base_url.clone(),
            unsubscribe_secret: settings.security.unsubscribe_secret.clone(),
            batch_delay_secs,
            flush_interval_secs,
        },
    };

    let db_for_worker = db.clone();
    tokio::spawn(async move {
        if let Err(e) = notify::start(notify_config, db_for_worker, rx_notify).await {
            tracing::error!("Notification worker crashed: {:?}", e);
        }
    });

    let state = AppState {
        db,
        notifier: tx_notify,
        unsubscribe_secret: settings.security.unsubscribe_secret.clone(),
        talks_per_page: settings.server.talks_per_page,
        comments_per_page: settings.server.comments_per_page,
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
