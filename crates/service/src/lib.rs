//! Service layer of the shoes shop.
//! - Owns the flat-file JSON store and the record identifiers.
//! - Registration, login and token verification under `auth`.
//! - Catalog operations over the shoe collection under `shoes`.

pub mod auth;
pub mod errors;
pub mod ids;
pub mod shoes;
pub mod storage;
