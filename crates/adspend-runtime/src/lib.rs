//! Explorer runtime layer for adspend.
//!
//! Sits between the data layer and the terminal UI: keeps the consolidated
//! dataset cached in memory keyed by file mtime and owns the interactive
//! session state the dashboard mutates.

pub mod dataset_cache;
pub mod session;

pub use adspend_core as core;
pub use adspend_data as data;
