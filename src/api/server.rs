//! Router assembly and the listening server

use super::handlers::{self, AppState};
use crate::config::ServerConfig;
use crate::core::records::PatientService;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

/// Build the router for every endpoint
pub fn build_app(service: Arc<PatientService>, config: &ServerConfig) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/data", get(handlers::list_patients))
        .route("/patient/{id}", get(handlers::get_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create", post(handlers::create_patient))
        .route("/edit/{id}", put(handlers::update_patient))
        .route("/delete/{id}", delete(handlers::delete_patient))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = res.status().as_u16(),
                            elapsed_ms = latency.as_millis() as u64,
                            "request handled"
                        );
                    },
                ),
        )
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .with_state(state)
}

/// HTTP server bound to the configured address
pub struct CarebookServer {
    addr: SocketAddr,
    app: Router,
}

impl CarebookServer {
    pub fn new(addr: SocketAddr, app: Router) -> Self {
        Self { addr, app }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until `shutdown` flips to `true`
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        serve(listener, self.app, shutdown).await
    }
}

/// Serve `app` on an already bound listener until `shutdown` flips to `true`
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown))
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            // Sender dropped without signalling; keep serving.
            std::future::pending::<()>().await;
        }
    }
    tracing::info!("shutdown signal received");
}
