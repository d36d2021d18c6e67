//! In-memory repository backend

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{SessionRepository, TeacherRepository, UserRepository};
use crate::auth::PasswordEncoder;
use crate::error::{Error, Result};
use crate::models::{Session, Teacher, User};

pub const SEED_ADMIN_EMAIL: &str = "yoga@studio.com";
pub const SEED_ADMIN_PASSWORD: &str = "test!1234";

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    teachers: BTreeMap<i64, Teacher>,
    sessions: BTreeMap<i64, Session>,
    last_user_id: i64,
    last_teacher_id: i64,
    last_session_id: i64,
}

/// Tables kept behind a single lock so cross-table writes stay consistent
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the studio admin account and two teachers
    pub async fn seed(&self, encoder: &PasswordEncoder) -> Result<()> {
        let password = encoder.encode(SEED_ADMIN_PASSWORD).await?;
        UserRepository::save(
            self,
            User::new(SEED_ADMIN_EMAIL, "Admin", "Admin", password, true),
        )
        .await?;
        TeacherRepository::save(self, Teacher::new("DELAHAYE", "Margot")).await?;
        TeacherRepository::save(self, Teacher::new("THIERCELIN", "Hélène")).await?;
        tracing::debug!("Seeded in-memory store");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn save(&self, mut user: User) -> Result<User> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if taken {
            return Err(Error::BadRequest("Error: Email is already taken!".to_string()));
        }

        let now = Utc::now();
        match user.id {
            Some(id) => {
                let existing = tables
                    .users
                    .get(&id)
                    .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;
                user.created_at = existing.created_at;
            }
            None => {
                tables.last_user_id += 1;
                user.id = Some(tables.last_user_id);
                user.created_at = Some(now);
            }
        }
        user.updated_at = Some(now);

        if let Some(id) = user.id {
            tables.users.insert(id, user.clone());
        }
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id);
        for session in tables.sessions.values_mut() {
            session.remove_participant(id);
        }
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Teacher>> {
        Ok(self.tables.read().await.teachers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        Ok(self.tables.read().await.teachers.get(&id).cloned())
    }

    async fn save(&self, mut teacher: Teacher) -> Result<Teacher> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        match teacher.id {
            Some(id) => {
                let existing = tables
                    .teachers
                    .get(&id)
                    .ok_or_else(|| Error::NotFound(format!("Teacher {} not found", id)))?;
                teacher.created_at = existing.created_at;
            }
            None => {
                tables.last_teacher_id += 1;
                teacher.id = Some(tables.last_teacher_id);
                teacher.created_at = Some(now);
            }
        }
        teacher.updated_at = Some(now);

        if let Some(id) = teacher.id {
            tables.teachers.insert(id, teacher.clone());
        }
        Ok(teacher)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Session>> {
        Ok(self.tables.read().await.sessions.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn save(&self, mut session: Session) -> Result<Session> {
        let mut tables = self.tables.write().await;

        session.dedup_participants();
        let known_users = &tables.users;
        session.users.retain(|id| known_users.contains_key(id));

        let now = Utc::now();
        match session.id {
            Some(id) => {
                let existing = tables
                    .sessions
                    .get(&id)
                    .ok_or_else(|| Error::NotFound(format!("Session {} not found", id)))?;
                session.created_at = existing.created_at;
            }
            None => {
                tables.last_session_id += 1;
                session.id = Some(tables.last_session_id);
                session.created_at = Some(now);
            }
        }
        session.updated_at = Some(now);

        if let Some(id) = session.id {
            tables.sessions.insert(id, session.clone());
        }
        Ok(session)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.tables.write().await.sessions.remove(&id);
        Ok(())
    }

    async fn add_participant(&self, session_id: i64, user_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(Error::NotFound(format!("User {} not found", user_id)));
        }

        let session = tables
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))?;
        let added = session.add_participant(user_id);
        if added {
            session.updated_at = Some(Utc::now());
        }
        Ok(added)
    }

    async fn remove_participant(&self, session_id: i64, user_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let session = tables
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))?;
        let removed = session.remove_participant(user_id);
        if removed {
            session.updated_at = Some(Utc::now());
        }
        Ok(removed)
    }
}
