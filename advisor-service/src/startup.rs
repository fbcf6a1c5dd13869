//! Application startup and lifecycle management.

use crate::config::AdvisorConfig;
use crate::handlers;
use crate::middleware::metrics::metrics_middleware;
use crate::services::providers::groq::GroqProvider;
use crate::services::providers::CompletionProvider;
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{extract_request_id, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AdvisorConfig,
    pub provider: Arc<dyn CompletionProvider>,
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Open to every origin: the service fronts a browser client during
    // development and performs no caller authentication.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(handlers::ask))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(cors)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id =
                    extract_request_id(request.headers()).unwrap_or_else(|| "-".to_string());

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AdvisorConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(GroqProvider::new(config.groq.clone()));

        tracing::info!(
            model = %config.groq.model,
            api_base = %config.groq.api_base,
            "Initialized Groq completion provider"
        );

        Self::with_provider(config, provider).await
    }

    /// Build with an explicit provider. Tests inject mocks through here.
    ///
    /// The listener is bound immediately so callers can read the port
    /// before the server starts (port 0 picks a free port).
    pub async fn with_provider(
        config: AdvisorConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            provider,
        };

        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
