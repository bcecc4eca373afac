//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: in-memory student store with an optional records file
//! - **security**: Argon2id password hashing
//!
//! Adapters translate between domain types and storage or library
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;
