//! # staple-adapter-storage-json
//!
//! Flat-file persistence adapter: the whole request collection lives in a
//! single pretty-printed JSON array.
//!
//! ## Responsibilities
//! - Implement the `RequestStore` port defined in `staple-app::ports::storage`
//! - Create the data directory and an empty collection on first start
//! - Replace the file atomically on every write
//!
//! ## Dependency rule
//! Depends on `staple-app` (for port traits) and `staple-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod file_store;

pub use file_store::{Config, JsonFileStore};
