//! Auth module: three-layer architecture (domain, repository, service),
//! plus the password hasher and the token issuer/verifier it is built on.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
