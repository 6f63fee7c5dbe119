use std::sync::Arc;

use async_trait::async_trait;
use models::User;

use crate::auth::errors::AuthError;
use crate::auth::repository::UserRepository;
use crate::storage::json_document_store::JsonDocumentStore;

/// Users kept in the `users` collection of the shared JSON document.
pub struct FileUserRepository {
    pub store: Arc<JsonDocumentStore>,
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let doc = self.store.snapshot().await?;
        Ok(doc.find_user(username).cloned())
    }

    async fn insert_unique(&self, user: User) -> Result<User, AuthError> {
        self.store
            .transaction(|doc| {
                if doc.find_user(&user.username).is_some() {
                    return Err(AuthError::Conflict);
                }
                doc.users.push(user.clone());
                Ok(user)
            })
            .await
    }

    async fn count(&self) -> Result<usize, AuthError> {
        Ok(self.store.snapshot().await?.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_insert_with_same_username_conflicts() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("shoes_users_{}.json", uuid::Uuid::new_v4()));
        let repo = FileUserRepository { store: JsonDocumentStore::open(&tmp).await? };
        let u = User::new("1", "ann", "h");
        repo.insert_unique(u.clone()).await?;
        let again = repo.insert_unique(User { id: "2".into(), ..u }).await;
        assert!(matches!(again, Err(AuthError::Conflict)));
        assert_eq!(repo.count().await?, 1);
        assert_eq!(repo.find_by_username("ann").await?.map(|u| u.id), Some("1".to_string()));
        assert!(repo.find_by_username("bob").await?.is_none());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
