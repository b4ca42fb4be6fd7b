//! Test helpers for inbound HTTP components.
//!
//! Provides an in-memory user store and a reversible hasher so handler tests
//! exercise the real [`UserService`] without touching SQLite.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use async_trait::async_trait;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewUserRecord, Password, PasswordDigest, User, UserId, UserService,
};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;

/// Prefix marking digests produced by [`MarkerHasher`].
pub const MARKER_PREFIX: &str = "hashed:";

/// Hasher that prefixes the plaintext so tests can see hashing happened.
#[derive(Debug, Default)]
pub struct MarkerHasher;

impl PasswordHasher for MarkerHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new(format!(
            "{MARKER_PREFIX}{}",
            password.expose()
        )))
    }
}

/// In-memory [`UserRepository`] with SQLite-like id assignment.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, NewUserRecord>,
}

impl InMemoryUserRepository {
    fn store(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.inner
            .lock()
            .map_err(|_| UserPersistenceError::connection("store poisoned"))
    }

    /// Snapshot of the stored record for `id`, password digest included.
    pub fn record(&self, id: i64) -> Option<NewUserRecord> {
        self.store().ok()?.rows.get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.store()?;
        Ok(store
            .rows
            .iter()
            .map(|(id, record)| {
                User::new(
                    UserId::new(*id),
                    record.name().clone(),
                    record.email().clone(),
                    record.age(),
                )
            })
            .collect())
    }

    async fn email_exists(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserPersistenceError> {
        let store = self.store()?;
        Ok(store.rows.iter().any(|(id, record)| {
            record.email() == email && exclude.is_none_or(|skip| skip.get() != *id)
        }))
    }

    async fn insert(&self, record: &NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut store = self.store()?;
        store.next_id += 1;
        let id = store.next_id;
        store.rows.insert(id, record.clone());
        Ok(UserId::new(id))
    }

    async fn update(
        &self,
        id: UserId,
        record: &NewUserRecord,
    ) -> Result<u64, UserPersistenceError> {
        let mut store = self.store()?;
        Ok(match store.rows.get_mut(&id.get()) {
            Some(existing) => {
                *existing = record.clone();
                1
            }
            None => 0,
        })
    }

    async fn delete(&self, id: UserId) -> Result<u64, UserPersistenceError> {
        let mut store = self.store()?;
        Ok(u64::from(store.rows.remove(&id.get()).is_some()))
    }
}

/// Handler state backed by `repo` and [`MarkerHasher`].
pub fn in_memory_state(repo: Arc<InMemoryUserRepository>) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(repo, Arc::new(MarkerHasher)));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// Health state already marked ready.
pub fn ready_health() -> web::Data<HealthState> {
    let health = HealthState::new();
    health.mark_ready();
    web::Data::new(health)
}
