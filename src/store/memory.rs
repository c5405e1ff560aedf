use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::{StoreError, UserStore};
use crate::dto::user::{NewUser, UpdateUser, User};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

/// Process-local `users` table.
///
/// Ids come from a counter that only moves forward, so a deleted id is never
/// handed out again.
#[derive(Default)]
pub struct MemoryUserStore {
    table: Mutex<Table>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        self.check_available()?;

        let mut table = self.table.lock().await;
        table.last_id += 1;
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: table.last_id,
            email: user.email,
            username: user.username,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.check_available()?;

        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.check_available()?;

        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: UpdateUser) -> Result<Option<User>, StoreError> {
        self.check_available()?;

        let mut table = self.table.lock().await;
        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(password) = changes.password {
            user.password = password;
        }
        user.updated_at = OffsetDateTime::now_utc();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;

        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}
