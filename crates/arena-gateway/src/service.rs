//! Gateway service - binds the listener and serves the router.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers;
use crate::middleware::create_cors_layer;
use arena_core::CoreServices;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: CoreServices,
}

/// Gateway service state.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl GatewayService {
    /// Create a new gateway over the given core services.
    pub fn new(config: GatewayConfig, services: CoreServices) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self {
            config,
            state: AppState { services },
            shutdown_tx: None,
        })
    }

    /// Build the HTTP router. Public so tests can drive the full stack
    /// without a socket.
    pub fn router(&self) -> Router {
        // `CorsLayer` and `TimeoutLayer` both synthesize empty response bodies,
        // so each requires its inner `ResBody: Default`. `TraceLayer` and
        // `RequestBodyLimitLayer` rewrap the body in their own non-`Default`
        // types. The `map_response` calls below normalize the body back to
        // `axum::body::Body` (which is `Default`) directly beneath each of those
        // two consumers. This is a pure type normalization: the response bytes,
        // the layer order, and runtime behavior are all unchanged.
        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .map_response(|res: axum::http::Response<_>| res.map(axum::body::Body::new))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.timeouts.request))
            .map_response(|res: axum::http::Response<_>| res.map(axum::body::Body::new))
            .layer(RequestBodyLimitLayer::new(self.config.limits.max_request_size));

        Router::new()
            .route("/api/tournaments", get(handlers::list_tournaments))
            .route("/api/claim-reward", post(handlers::claim_reward))
            .route("/api/redeem-referral", post(handlers::redeem_referral))
            .route("/api/join-tournament", post(handlers::join_tournament))
            .route("/health", get(handlers::health))
            .layer(middleware)
            .with_state(self.state.clone())
    }

    /// Start serving. Returns once a shutdown is triggered or the server
    /// fails.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %addr, "Starting HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Trigger graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
