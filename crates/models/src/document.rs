use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::shoe::Shoe;
use crate::user::User;

/// The whole persisted state. Both collections keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub shoes: Vec<Shoe>,
    /// Other top-level collections; kept so a rewrite does not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreDocument {
    /// Parse a stored document; missing collections default to empty.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_vec_pretty(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_shoe(&self, id: &str) -> Option<&Shoe> {
        self.shoes.iter().find(|s| s.id == id)
    }

    pub fn find_shoe_mut(&mut self, id: &str) -> Option<&mut Shoe> {
        self.shoes.iter_mut().find(|s| s.id == id)
    }

    /// Remove a shoe by id; returns whether it existed.
    pub fn remove_shoe(&mut self, id: &str) -> bool {
        match self.shoes.iter().position(|s| s.id == id) {
            Some(idx) => {
                self.shoes.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_default_to_empty() -> Result<(), ModelError> {
        let doc = StoreDocument::from_slice(b"{}")?;
        assert!(doc.users.is_empty());
        assert!(doc.shoes.is_empty());
        let doc = StoreDocument::from_slice(br#"{"shoes":[{"id":"a","brand":"Puma"}]}"#)?;
        assert_eq!(doc.shoes.len(), 1);
        assert!(doc.users.is_empty());
        Ok(())
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(StoreDocument::from_slice(b"not json"), Err(ModelError::Decode(_))));
    }

    #[test]
    fn remove_keeps_order_of_the_rest() -> Result<(), ModelError> {
        let mut doc = StoreDocument::from_slice(br#"{"shoes":[{"id":"a"},{"id":"b"},{"id":"c"}]}"#)?;
        assert!(doc.remove_shoe("b"));
        assert!(!doc.remove_shoe("b"));
        let ids: Vec<_> = doc.shoes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        Ok(())
    }

    #[test]
    fn unknown_keys_are_written_back() -> Result<(), ModelError> {
        let raw = br#"{"users":[{"id":"u","username":"ann","password":"h","role":"admin"}],"orders":[1,2]}"#;
        let doc = StoreDocument::from_slice(raw)?;
        let v: serde_json::Value = serde_json::from_slice(&doc.to_vec_pretty()?)?;
        assert_eq!(
            v,
            serde_json::json!({
                "users": [{"id": "u", "username": "ann", "password": "h", "role": "admin"}],
                "shoes": [],
                "orders": [1, 2]
            })
        );
        Ok(())
    }

    #[test]
    fn serialized_document_always_has_both_keys() -> Result<(), ModelError> {
        let v: serde_json::Value = serde_json::from_slice(&StoreDocument::default().to_vec_pretty()?)?;
        assert_eq!(v, serde_json::json!({"users": [], "shoes": []}));
        Ok(())
    }
}
