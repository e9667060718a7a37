//! Runtime wiring: service facade and auto-save scheduling.

pub mod api;
pub mod autosave;

pub use api::Ledger;
pub use autosave::{AutoSaveScheduler, DEFAULT_AUTO_SAVE_INTERVAL};
