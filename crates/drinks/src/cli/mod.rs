//! # CLI Layer
//!
//! One possible client for drinkapp. This is the only place that knows
//! about stdout, stderr and exit codes.
//!
//! ## Commands
//!
//! - `drinks` / `drinks list [--sort name|rating|recent]`: the catalog
//! - `drinks show <id>`: one drink with ingredients and instructions
//! - `drinks add --name .. --rating ..`: create a drink from a form
//! - `drinks edit <id> ..`: change selected fields of a drink
//! - `drinks delete <id>`: remove a drink
//! - `drinks backend`: which storage backend is in use
//!
//! Add and edit go through `DrinkForm`, so field validation messages are
//! the ones any other client would show.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Dispatch and command handlers
//! - `render`: Output formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
