//! Storage Adapters
//!
//! Implementations of the SessionStore port for per-chat conversation state.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Stores sessions in memory for the life of the process
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let sessions = Arc::new(InMemorySessionStore::new());
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
