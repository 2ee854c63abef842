//! Persistence: the key-value store, its backends and the typed collections on top.

/// Typed access to the two named collections.
pub mod collections;
/// Key-value persistence backends.
pub mod kv_store;
/// Database model definitions.
pub mod models;
/// Connection retry timing.
pub mod retry;
/// Storage abstraction layer for database operations.
pub mod storage;
