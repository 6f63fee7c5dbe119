//! Persisted records of the shoes shop and the document that holds them.

pub mod document;
pub mod errors;
pub mod shoe;
pub mod user;
pub mod value;

pub use document::StoreDocument;
pub use shoe::{NewShoe, Shoe, ShoePatch, ShoeQuery};
pub use user::User;
pub use value::FieldValue;
