//! Storage abstractions for service layer
//!
//! The whole shop lives in one JSON document on disk; every service goes
//! through [`json_document_store::JsonDocumentStore`] to read or rewrite it.

pub mod json_document_store;
