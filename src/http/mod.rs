use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::UserStore;

mod error;
mod extractor;
mod health;
mod users;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shared per-request context, handed to every handler as an `Extension`.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<Config>,
    pub store: Arc<dyn UserStore>,
}

/// A wrapper type for all successful responses.
#[derive(serde::Serialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub async fn serve(config: Config, store: Arc<dyn UserStore>) -> anyhow::Result<()> {
    let addr = SocketAddr::new(config.bind_addr, config.port);
    let app = app(ApiContext {
        config: Arc::new(config),
        store,
    });

    log::info!("server is running on {addr}");

    hyper::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running HTTP server")
}

/// The full application router with its layers applied.
pub fn app(ctx: ApiContext) -> Router {
    api_router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(ctx)),
    )
}

fn api_router() -> Router {
    health::router().merge(users::router())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutdown signal received");
}
