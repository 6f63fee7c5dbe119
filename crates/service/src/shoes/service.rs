use std::sync::Arc;

use models::{NewShoe, Shoe, ShoePatch, ShoeQuery};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::ids::new_id;
use crate::storage::json_document_store::JsonDocumentStore;

const SHOE: &str = "Shoe";

/// Application service over the `shoes` collection. Every call re-reads the
/// store; mutations run inside a store transaction.
pub struct ShoeService {
    store: Arc<JsonDocumentStore>,
}

impl ShoeService {
    pub fn new(store: Arc<JsonDocumentStore>) -> Self { Self { store } }

    pub async fn list(&self) -> Result<Vec<Shoe>, ServiceError> {
        Ok(self.store.snapshot().await?.shoes)
    }

    pub async fn get(&self, id: &str) -> Result<Shoe, ServiceError> {
        self.store
            .snapshot()
            .await?
            .find_shoe(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(SHOE))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewShoe) -> Result<Shoe, ServiceError> {
        let shoe = input.into_shoe(new_id());
        let created = self
            .store
            .transaction(|doc| {
                doc.shoes.push(shoe.clone());
                Ok::<_, ServiceError>(shoe)
            })
            .await?;
        info!(shoe_id = %created.id, "shoe_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ShoePatch) -> Result<Shoe, ServiceError> {
        self.store
            .transaction(|doc| {
                let shoe = doc.find_shoe_mut(id).ok_or_else(|| ServiceError::not_found(SHOE))?;
                patch.apply(shoe);
                Ok(shoe.clone())
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .transaction(|doc| {
                if doc.remove_shoe(id) {
                    Ok(())
                } else {
                    Err(ServiceError::not_found(SHOE))
                }
            })
            .await?;
        info!(shoe_id = %id, "shoe_deleted");
        Ok(())
    }

    /// Filter in storage order; an empty query returns every shoe.
    pub async fn search(&self, query: &ShoeQuery) -> Result<Vec<Shoe>, ServiceError> {
        let shoes = self.store.snapshot().await?.shoes;
        if query.is_empty() {
            return Ok(shoes);
        }
        Ok(shoes.into_iter().filter(|s| query.matches(s)).collect())
    }
}
