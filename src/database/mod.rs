//! linkshelf persistence layer.
//!
//! SQLite connection management, schema migrations and the key-value
//! store the collection is saved into.
//!
//! # Usage
//!
//! ```no_run
//! use linkshelf::database::{Database, KeyValueStore, SqliteStore};
//!
//! let db = Database::open("linkshelf.db").expect("failed to open database");
//! let store = SqliteStore::new(db);
//! store.set("linkshelf.settings", &serde_json::json!({})).expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore, SqliteStore};
