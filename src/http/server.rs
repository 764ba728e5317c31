//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router; every path and method goes to one dispatcher
//! - Wire up middleware (request ID, tracing, panic recovery)
//! - Serve on a bound listener until shutdown, then drain in-flight requests

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{response::Response, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers::dispatch;
use crate::http::response;
use crate::http::status_page::StatusPage;
use crate::lifecycle::ShutdownSignal;
use crate::net::ConnectionTracker;
use crate::sql::{GrammarValidator, StatementValidator};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub validator: Arc<dyn StatementValidator>,
    pub status_page: Arc<StatusPage>,
    pub connections: ConnectionTracker,
}

/// HTTP server for statement validation.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
    connections: ConnectionTracker,
}

impl HttpServer {
    /// Create a server that validates with the SQL grammar.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_validator(config, Arc::new(GrammarValidator))
    }

    /// Create a server with a custom validator.
    pub fn with_validator(config: ServerConfig, validator: Arc<dyn StatementValidator>) -> Self {
        let config = Arc::new(config);
        let connections = ConnectionTracker::new();

        let state = AppState {
            status_page: Arc::new(StatusPage::from_config(&config)),
            config: Arc::clone(&config),
            validator,
            connections: connections.clone(),
        };

        Self {
            router: build_router(state),
            config,
            connections,
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            get_enabled = self.config.get_enabled,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        self.connections.wait_idle().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for serving in-process (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Tracker of requests currently being handled.
    pub fn connections(&self) -> &ConnectionTracker {
        &self.connections
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(dispatch))
        .route("/{*path}", any(dispatch))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Turn a handler panic into the generic 500 page.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");
    response::internal_error()
}
