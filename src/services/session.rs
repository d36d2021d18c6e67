use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::Session;
use crate::store::{SessionRepository, UserRepository};

/// Session CRUD plus the participation toggle
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    pub async fn find_all(&self) -> Result<Vec<Session>> {
        self.sessions.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Session>> {
        self.sessions.find_by_id(id).await
    }

    pub async fn create(&self, mut session: Session) -> Result<Session> {
        session.id = None;
        let saved = self.sessions.save(session).await?;
        tracing::info!("Created session {:?} '{}'", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn update(&self, id: i64, mut session: Session) -> Result<Session> {
        self.require(id).await?;
        session.id = Some(id);
        let saved = self.sessions.save(session).await?;
        tracing::info!("Updated session {}", id);
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.require(id).await?;
        self.sessions.delete_by_id(id).await?;
        tracing::info!("Deleted session {}", id);
        Ok(())
    }

    pub async fn participate(&self, id: i64, user_id: i64) -> Result<()> {
        self.require(id).await?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(Error::NotFound(format!("User {} not found", user_id)));
        }

        if !self.sessions.add_participant(id, user_id).await? {
            return Err(Error::BadRequest(format!(
                "User {} already participates in session {}",
                user_id, id
            )));
        }

        tracing::info!("User {} joined session {}", user_id, id);
        Ok(())
    }

    pub async fn no_longer_participate(&self, id: i64, user_id: i64) -> Result<()> {
        self.require(id).await?;

        if !self.sessions.remove_participant(id, user_id).await? {
            return Err(Error::BadRequest(format!(
                "User {} does not participate in session {}",
                user_id, id
            )));
        }

        tracing::info!("User {} left session {}", user_id, id);
        Ok(())
    }

    async fn require(&self, id: i64) -> Result<Session> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", id)))
    }
}
