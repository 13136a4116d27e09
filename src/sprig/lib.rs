//! # Sprig Architecture
//!
//! Sprig is a **houseplant care tracker built as a library**. The command-line
//! client is one consumer of it; nothing below the CLI knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - clap parsing, themed terminal output, tracing setup      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - One method per user operation                            │
//! │  - Parses selectors, stamps the current time                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic, returns CmdResult + messages             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Care-Schedule Engine (schedule.rs)                         │
//! │  reminders.rs, history.rs: read-only views over the engine  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - PlantStore over a StorageBackend                         │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plant identification (`identify/`) hangs off the side: it is async, picked
//! by configuration, and feeds its suggestion through the add-plant form
//! session in `form.rs`.
//!
//! ## Time
//!
//! Nothing below the API reads the clock. Commands and the engine take `now`
//! as an argument, so every rule about due dates is tested with fixed times.
//!
//! ## Testing Strategy
//!
//! - **Engine and views**: pure functions, tested with hand-built plants.
//! - **Store and commands**: [`store::mem_backend::MemBackend`] plus the
//!   fixtures in [`store::plant_store::fixtures`].
//! - **Identification**: the catalog identifier with a paused tokio clock,
//!   and JSON fixtures for the plant.id response mapping.
//! - **CLI**: end-to-end runs of the binary against a temporary data
//!   directory (`tests/`).

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod history;
pub mod identify;
pub mod model;
pub mod reminders;
pub mod schedule;
pub mod store;
pub mod themes;
