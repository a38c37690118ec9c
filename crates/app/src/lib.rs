//! # staple-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RequestStore` — load and replace the whole request collection
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RequestService` — list, stats, create, update status, delete
//! - Serialize read-modify-write cycles so one process never loses an update
//!
//! ## Dependency rule
//! Depends on `staple-domain` only (plus `tokio::sync` for the write lock).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
