use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use super::{StoreError, UserStore};
use crate::config::Config;
use crate::dto::user::{NewUser, UpdateUser, User};

const CREATE_USERS_TABLE: &str = r#"
    create table if not exists "users" (
        id bigserial primary key,
        email varchar(255) not null,
        username varchar(50) not null,
        password varchar(255) not null,
        created_at timestamptz not null default now(),
        updated_at timestamptz not null default now()
    )
"#;

#[derive(Clone)]
pub struct PgUserStore {
    db: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(db: Pool<Postgres>) -> Self {
        Self { db }
    }

    pub async fn connect(config: &Config, database_url: &str) -> Result<Self, StoreError> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.store_timeout())
            .connect(database_url)
            .await?;

        Ok(Self::new(db))
    }

    /// Cheap round trip used at startup to fail fast on a bad connection string.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    /// Creates the `users` table when it does not exist yet.
    pub async fn sync_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
                insert into "users" (email, username, password)
                values ($1, $2, $3)
                returning id, email, username, password, created_at, updated_at
            "#,
        )
        .bind(user.email)
        .bind(user.username)
        .bind(user.password)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
                select id, email, username, password, created_at, updated_at
                from "users" order by id asc
            "#,
        )
        .fetch(&self.db)
        .try_collect::<Vec<_>>()
        .await?;

        Ok(users)
    }

    async fn find(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
                select id, email, username, password, created_at, updated_at
                from "users" where id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, changes: UpdateUser) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            // Optional updates of fields without needing a separate query for each.
            r#"
                update "users"
                set email = coalesce($1, "users".email),
                    username = coalesce($2, "users".username),
                    password = coalesce($3, "users".password),
                    updated_at = now()
                where id = $4
                returning id, email, username, password, created_at, updated_at
            "#,
        )
        .bind(changes.email)
        .bind(changes.username)
        .bind(changes.password)
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"delete from "users" where id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
