use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;

use super::extractor::{ApiJson, UserId};
use super::{ApiContext, Envelope, Result};
use crate::dto::user::{NewUser, UpdateUser, User};
use crate::logic::user::{self, UsersHandler};

pub fn router() -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn handler(ctx: &ApiContext) -> user::Handler {
    user::Handler::new(ctx.store.clone(), ctx.config.store_timeout())
}

async fn create_user(
    ctx: Extension<ApiContext>,
    ApiJson(req): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    let user = handler(&ctx).create_user(req).await?;

    Ok((StatusCode::CREATED, Json(Envelope::data(user))))
}

async fn list_users(ctx: Extension<ApiContext>) -> Result<Json<Envelope<Vec<User>>>> {
    let users = handler(&ctx).list_users().await?;

    Ok(Json(Envelope::data(users)))
}

async fn get_user(
    ctx: Extension<ApiContext>,
    UserId(id): UserId,
) -> Result<Json<Envelope<User>>> {
    let user = handler(&ctx).get_user(id).await?;

    Ok(Json(Envelope::data(user)))
}

async fn update_user(
    ctx: Extension<ApiContext>,
    UserId(id): UserId,
    ApiJson(req): ApiJson<UpdateUser>,
) -> Result<Json<Envelope<User>>> {
    let user = handler(&ctx).update_user(id, req).await?;

    Ok(Json(Envelope::data(user)))
}

async fn delete_user(
    ctx: Extension<ApiContext>,
    UserId(id): UserId,
) -> Result<Json<Envelope<()>>> {
    handler(&ctx).delete_user(id).await?;

    Ok(Json(Envelope::message("User deleted successfully")))
}
