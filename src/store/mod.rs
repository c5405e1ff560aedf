//! Persistence for the `users` table.
//!
//! The service only talks to [`UserStore`]; which backend sits behind it is
//! decided once at startup.

use async_trait::async_trait;

use crate::dto::user::{NewUser, UpdateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The database refused the row, e.g. a value too long for its column.
    #[error("store rejected the data: {0}")]
    Rejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("an error occurred with the database")]
    Sqlx(#[source] sqlx::Error),
}

/// Data exception (22xxx) and integrity violation (23xxx) SQLSTATE classes
/// mean the input itself was refused.
fn is_rejection(code: &str) -> bool {
    code.starts_with("22") || code.starts_with("23")
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(dbe) if dbe.code().map_or(false, |code| is_rejection(&code)) => {
                Self::Rejected(dbe.message().to_owned())
            }
            sqlx::Error::PoolTimedOut => Self::Unavailable("connection pool timed out".into()),
            e => Self::Sqlx(e),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// All rows, ascending by id.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Applies the present fields of `changes`; `None` when no row has `id`.
    async fn update(&self, id: i64, changes: UpdateUser) -> Result<Option<User>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::string_data_right_truncation("22001", true)]
    #[case::invalid_text_representation("22P02", true)]
    #[case::not_null_violation("23502", true)]
    #[case::unique_violation("23505", true)]
    #[case::undefined_table("42P01", false)]
    #[case::connection_failure("08006", false)]
    #[case::admin_shutdown("57P01", false)]
    fn classifies_sqlstate(#[case] code: &str, #[case] rejected: bool) {
        assert_eq!(is_rejection(code), rejected);
    }

    #[test]
    fn non_database_errors_are_not_rejections() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Sqlx(_)
        ));
    }
}
