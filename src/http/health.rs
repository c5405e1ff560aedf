use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};

use super::ApiContext;

pub fn router() -> Router {
    Router::new().route("/", get(health_check))
}

#[derive(serde::Serialize)]
struct Health {
    message: String,
    status: &'static str,
}

async fn health_check(ctx: Extension<ApiContext>) -> Json<Health> {
    Json(Health {
        message: ctx.config.app_name.clone(),
        status: "running",
    })
}
