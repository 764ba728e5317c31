//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Method, Request};
use axum::Router;
use sqlgate::config::ServerConfig;
use sqlgate::http::HttpServer;
use sqlgate::lifecycle::Shutdown;
use sqlgate::net::listener::bind_addr;
use sqlgate::sql::{GrammarValidator, StatementValidator, ValidationOutcome};
use tokio::task::JoinHandle;

/// A server bound to an ephemeral port on loopback.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    handle: JoinHandle<std::io::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Trigger shutdown and wait for the server to drain.
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

/// Start a real server. `config.port` is overwritten with the bound port.
#[allow(dead_code)]
pub async fn spawn_server(mut config: ServerConfig) -> TestServer {
    let listener = bind_addr("127.0.0.1:0".parse().unwrap(), config.backlog)
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();
    config.port = addr.port();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that never reuses connections or goes through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Router with a fake peer address, for `oneshot` calls.
#[allow(dead_code)]
pub fn test_router(server: &HttpServer) -> Router {
    server
        .router()
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40_000))))
}

#[allow(dead_code)]
pub fn request(method: Method, path: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(body.into())
        .unwrap()
}

/// Validator that counts calls before delegating to the grammar.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingValidator {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingValidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatementValidator for CountingValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        GrammarValidator.validate(raw)
    }
}

/// Validator that always panics.
#[allow(dead_code)]
pub struct PanickingValidator;

impl StatementValidator for PanickingValidator {
    fn validate(&self, _raw: &str) -> ValidationOutcome {
        panic!("validator exploded");
    }
}

#[allow(dead_code)]
pub fn counting_server(config: ServerConfig) -> (HttpServer, Arc<CountingValidator>) {
    let validator = Arc::new(CountingValidator::default());
    let server = HttpServer::with_validator(config, validator.clone());
    (server, validator)
}
