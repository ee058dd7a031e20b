//! HTTP listener lifecycle: startup logging, binding, graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::settings::Settings;
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Open the cache store, bind and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails when the cache store cannot be opened or migrated, or the
    /// address cannot be bound.
    pub async fn run(self) -> anyhow::Result<()> {
        log_settings(&self.settings);

        let state = AppState::from_settings(&self.settings).await?;
        let router = create_router(state, &self.settings.server);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Bind failed");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;
        tracing::info!(address = %address, "Listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Stopped");
        Ok(())
    }
}

/// One event per section. The catalog credential is reported as set or unset only.
fn log_settings(settings: &Settings) {
    let Settings {
        application,
        server,
        cache,
        tmdb,
        ..
    } = settings;

    tracing::info!(
        name = %application.name,
        version = %application.version,
        environment = application.environment.as_str(),
        host = %server.host,
        port = server.port,
        request_timeout = server.request_timeout,
        "Starting"
    );
    tracing::info!(
        backend = ?cache.backend,
        watchlist_ttl_hours = cache.watchlist_ttl_hours,
        metadata_ttl_hours = cache.metadata_ttl_hours,
        concurrency_width = cache.concurrency_width,
        cache_placeholders = cache.cache_placeholders,
        "Cache"
    );
    tracing::info!(
        base_url = %tmdb.base_url,
        auth_method = %tmdb.auth_method,
        region = %tmdb.region,
        api_key_set = !tmdb.api_key.is_empty(),
        account_id_set = !tmdb.account_id.is_empty(),
        "Catalog"
    );
    if tmdb.api_key.is_empty() {
        tracing::warn!("tmdb.api_key is empty; catalog requests will be rejected upstream");
    }
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(signal = received, "Shutting down");
}
