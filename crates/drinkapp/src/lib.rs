//! # Drinkapp Architecture
//!
//! Drinkapp is a **UI-agnostic drink catalog library**: a personal log of
//! tried drinks with a rating, a date, ingredients and preparation notes.
//! The `drinks` binary is one client of it; nothing in here writes to a
//! terminal or exits the process.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (state/)                                       │
//! │  - DrinkList: collection, loading flag, last error          │
//! │  - DrinkForm: editable draft and field validation           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository Layer (repository/)                             │
//! │  - Repository facade, selected once by BackendSelector      │
//! │  - LocalRepository (key-value) / RemoteRepository (tables)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore: FsKeyValueStore, MemKeyValueStore         │
//! │  - TableClient: PostgrestClient, MemTables                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Backend Selection
//!
//! The remote backend is used iff both a backend url and an access key are
//! configured. The choice is made once, at startup, and passed into the
//! facade as a value. A failing remote never falls back to local storage.
//!
//! ## Errors
//!
//! Storage failures are logged with their cause and surfaced as one generic
//! message per operation ("Failed to add drink. Please try again."). The
//! list state records that message and also returns the error, leaving the
//! presentation to the caller.
//!
//! ## Testing Strategy
//!
//! Every storage trait has an in-memory implementation with failure
//! injection, so repository and state logic is tested without a disk or a
//! network. Filesystem behaviour is covered against temporary directories.
//!
//! ## Module Overview
//!
//! - [`state`]: List and form state driven by the client
//! - [`repository`]: The repository facade and both backends
//! - [`store`]: Storage traits and implementations
//! - [`model`]: Core data types (`Drink`, `NewDrink`, `Ingredient`)
//! - [`date`]: Display and wire date formats
//! - [`seed`]: Sample drinks for first use of local storage
//! - [`config`]: Configuration and backend selection
//! - [`error`]: Error types

pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod repository;
pub mod seed;
pub mod state;
pub mod store;

#[cfg(test)]
pub mod test_utils;
