//! HTTP server for the advising service

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AdvisorConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Advising HTTP server
pub struct AdvisorServer {
    config: AdvisorConfig,
    state: AppState,
}

impl AdvisorServer {
    /// Create a server with production providers
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server over existing state (used by tests)
    pub fn with_state(config: AdvisorConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Result<Router> {
        // CORS is restricted to the single development frontend origin.
        let origin: HeaderValue = self
            .config
            .server
            .cors_origin
            .parse()
            .map_err(|_| Error::Config(format!(
                "Invalid CORS origin: {}",
                self.config.server.cors_origin
            )))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        Ok(Router::new()
            .route("/", get(routes::root))
            .route("/ask", post(routes::ask))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors))
    }

    /// Start serving until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router()?;

        tracing::info!("Starting advisor server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// The configured listen address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}
