//! Shoe catalog: list, lookup, search and authenticated mutations.

pub mod service;

pub use service::ShoeService;
