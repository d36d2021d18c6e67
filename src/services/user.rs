use std::sync::Arc;

use crate::error::Result;
use crate::models::User;
use crate::store::UserRepository;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
        self.users.exists_by_email(email).await
    }

    /// Store a new user. `user.password` must already be hashed.
    pub async fn create(&self, user: User) -> Result<User> {
        let saved = self.users.save(user).await?;
        tracing::info!("Registered user {} ({:?})", saved.email, saved.id);
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.users.delete_by_id(id).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}
