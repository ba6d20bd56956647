//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Stores sessions in memory with per-session locking
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let store = InMemorySessionStore::new();
//! let mut lease = store.lease(&session_id, Locale::Uz).await?;
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
