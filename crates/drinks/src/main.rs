//! # Drinks CLI
//!
//! The `drinks` binary is a thin client over the `drinkapp` library. This file
//! only runs `cli::run()` and handles process termination; everything the
//! user sees is produced under `src/cli/`.
//!
//! ## Workspace Structure
//!
//! - `crates/drinkapp/`: UI-agnostic library (models, storage, repository
//!   facade, list and form state)
//! - `crates/drinks/`: this command-line client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/drinks/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch to list/form state (commands.rs)                │
//! │  - Plain text rendering (render.rs)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (crates/drinkapp/src/state/)                   │
//! │  - DrinkList and DrinkForm                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository + Storage (crates/drinkapp/src/{repository,store})│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Library diagnostics go through `tracing` and are written to stderr.
//! `RUST_LOG` controls the filter; the default shows warnings only, and
//! `--verbose` raises it to debug.

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
