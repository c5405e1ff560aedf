use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use crate::{
    dto::user::{NewUser, UpdateUser, User},
    http::{Error, Result},
    store::{StoreError, UserStore},
};

pub trait UsersHandler {
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, Error>> + Send;

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Error>> + Send;

    fn get_user(&self, id: i64) -> impl Future<Output = Result<User, Error>> + Send;

    fn update_user(
        &self,
        id: i64,
        changes: UpdateUser,
    ) -> impl Future<Output = Result<User, Error>> + Send;

    fn delete_user(&self, id: i64) -> impl Future<Output = Result<(), Error>> + Send;
}

pub struct Handler {
    store: Arc<dyn UserStore>,
    timeout: Duration,
}

impl Handler {
    pub fn new(store: Arc<dyn UserStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    // Every store interaction goes through here so none of them can hang a request.
    async fn call<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!("store call exceeded {:?}", self.timeout))
            })?
    }
}

/// On writes a refused row is the caller's fault, anything else is ours.
fn write_error(e: StoreError) -> Error {
    match e {
        StoreError::Rejected(message) => Error::Validation(message),
        e => Error::Store(e),
    }
}

impl UsersHandler for Handler {
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        user.validate()?;

        let user = self
            .call(self.store.insert(user))
            .await
            .map_err(write_error)?;

        log::debug!("[create_user] created user {}", user.id);
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.call(self.store.list()).await?)
    }

    async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.call(self.store.find(id))
            .await?
            .ok_or(Error::NotFound)
    }

    // Only the fields present in `changes` are written; an empty update is a read.
    async fn update_user(&self, id: i64, changes: UpdateUser) -> Result<User, Error> {
        changes.validate()?;

        if changes.is_empty() {
            return self.get_user(id).await;
        }

        self.call(self.store.update(id, changes))
            .await
            .map_err(write_error)?
            .ok_or(Error::NotFound)
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        if !self.call(self.store.delete(id)).await? {
            return Err(Error::NotFound);
        }

        log::debug!("[delete_user] deleted user {id}");
        Ok(())
    }
}
