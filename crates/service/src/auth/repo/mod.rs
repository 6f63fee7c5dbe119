//! Concrete `UserRepository` backends.

pub mod file;
