use std::sync::Arc;

use crate::auth::models::UserPrincipal;
use crate::error::{Error, Result};
use crate::store::UserRepository;

/// Resolves a login name to the principal it belongs to
#[derive(Clone)]
pub struct UserDetailsService {
    users: Arc<dyn UserRepository>,
}

impl UserDetailsService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn load_user_by_username(&self, email: &str) -> Result<UserPrincipal> {
        self.users
            .find_by_email(email)
            .await?
            .map(|user| UserPrincipal::from(&user))
            .ok_or_else(|| Error::UsernameNotFound(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PasswordEncoder;
    use crate::store::{MemoryStore, SEED_ADMIN_EMAIL};

    #[tokio::test]
    async fn test_load_existing_user() {
        let store = MemoryStore::new();
        store.seed(&PasswordEncoder::new(4)).await.unwrap();
        let details = UserDetailsService::new(Arc::new(store));

        let principal = details.load_user_by_username(SEED_ADMIN_EMAIL).await.unwrap();
        assert_eq!(principal.username, SEED_ADMIN_EMAIL);
        assert!(principal.admin);
        assert!(principal.authorities().is_empty());
        assert!(principal.is_enabled());
        assert!(principal.is_account_non_locked());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let details = UserDetailsService::new(Arc::new(MemoryStore::new()));

        let err = details.load_user_by_username("nobody@studio.com").await.unwrap_err();
        assert!(matches!(err, Error::UsernameNotFound(_)));
        assert_eq!(err.to_string(), "User Not Found with email: nobody@studio.com");
    }
}
