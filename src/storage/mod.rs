//! Durable key-value persistence for the client-side stores
//!
//! Each logical store (track registry, message log) writes its full state
//! under one fixed key. The contract is deliberately small: reads that fail
//! or find nothing yield an empty initial state upstream, and write failures
//! are swallowed by the callers after logging.

mod kv;

pub use kv::{FileStore, KvStore, MemoryStore};

/// Key under which the track registry persists its list
pub const TRACKS_KEY: &str = "echo_tracks";

/// Key under which the message log persists its entries
pub const MESSAGES_KEY: &str = "echo-chat-storage";
