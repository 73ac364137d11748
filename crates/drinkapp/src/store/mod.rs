//! # Storage Layer
//!
//! The repositories never talk to a disk or a network directly. They go
//! through one of two collaborator traits, each with a production
//! implementation and an in-memory one for tests.
//!
//! ## Key-value storage ([`kv::KeyValueStore`])
//!
//! Used by the local repository. The whole drink collection lives as one
//! JSON blob under a single key, so a write is all-or-nothing.
//!
//! - [`fs_kv::FsKeyValueStore`]: one file per key, written atomically
//!   (temp file then rename).
//! - [`mem_kv::MemKeyValueStore`]: `RefCell` map with read/write error
//!   simulation.
//!
//! ## Relational storage ([`tables::TableClient`])
//!
//! Used by the remote repository. Two tables, `drinks` and `ingredients`,
//! with `ingredients.drink_id` referencing `drinks.id` and cascading on
//! delete.
//!
//! - [`postgrest::PostgrestClient`]: HTTP client for a PostgREST endpoint.
//! - [`mem_tables::MemTables`]: in-memory tables with generated ids,
//!   cascading deletes and per-operation failure injection.
//!
//! ## Storage Layout (local)
//!
//! ```text
//! <data_dir>/
//! └── _drinks_drinks.json   # JSON array of drinks under key "@drinks:drinks"
//! ```

pub mod fs_kv;
pub mod kv;
pub mod mem_kv;
pub mod mem_tables;
pub mod postgrest;
pub mod tables;

pub use fs_kv::FsKeyValueStore;
pub use kv::KeyValueStore;
pub use mem_kv::MemKeyValueStore;
pub use mem_tables::{MemTables, TableOp};
pub use postgrest::PostgrestClient;
pub use tables::{Filter, Row, Select, TableClient};
