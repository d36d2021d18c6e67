//! Repositories for users, teachers and sessions
//!
//! Two backends implement the repository traits: an in-memory store used
//! for development and tests, and a PostgreSQL store.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::PasswordEncoder;
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{Session, Teacher, User};

pub use memory::{MemoryStore, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    /// Insert when `id` is unset, update otherwise. Returns the stored row.
    async fn save(&self, user: User) -> Result<User>;
    /// Also removes the user from every session it attends
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Teacher>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn save(&self, teacher: Teacher) -> Result<Teacher>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Session>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>>;
    /// Persists the participant set as given, minus duplicates and unknown users
    async fn save(&self, session: Session) -> Result<Session>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
    /// Add one participant in a single step. Returns false if the user already attends.
    async fn add_participant(&self, session_id: i64, user_id: i64) -> Result<bool>;
    /// Returns false if the user was not attending
    async fn remove_participant(&self, session_id: i64, user_id: i64) -> Result<bool>;
}

/// Handles to the three repositories, backed by the same store
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Store {
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: UserRepository + TeacherRepository + SessionRepository + 'static,
    {
        Self {
            users: backend.clone(),
            teachers: backend.clone(),
            sessions: backend,
        }
    }

    /// In-memory store, optionally seeded with the studio's starter data
    pub async fn memory(seed: bool, encoder: &PasswordEncoder) -> Result<Self> {
        let store = MemoryStore::new();
        if seed {
            store.seed(encoder).await?;
        }
        Ok(Self::from_backend(Arc::new(store)))
    }

    /// Open the store selected by the database configuration
    pub async fn open(config: &DatabaseConfig, encoder: &PasswordEncoder) -> Result<Self> {
        match &config.url {
            Some(url) => {
                tracing::info!("Using PostgreSQL store");
                let store = PgStore::connect(url).await?;
                Ok(Self::from_backend(Arc::new(store)))
            }
            None => {
                tracing::warn!("No database.url configured, using the in-memory store");
                Self::memory(config.seed, encoder).await
            }
        }
    }
}
