use async_trait::async_trait;
use models::User;

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Insert `user` unless its username is taken; the check and the insert are atomic.
    async fn insert_unique(&self, user: User) -> Result<User, AuthError>;

    async fn count(&self) -> Result<usize, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl MockUserRepository {
        fn users(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, AuthError> {
            self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
            Ok(self.users()?.iter().find(|u| u.username == username).cloned())
        }

        async fn insert_unique(&self, user: User) -> Result<User, AuthError> {
            let mut users = self.users()?;
            if users.iter().any(|u| u.username == user.username) {
                return Err(AuthError::Conflict);
            }
            users.push(user.clone());
            Ok(user)
        }

        async fn count(&self) -> Result<usize, AuthError> {
            Ok(self.users()?.len())
        }
    }
}
