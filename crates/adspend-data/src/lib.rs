//! Data layer for the adspend toolkit.
//!
//! Responsible for reading the raw platform exports, normalizing them into
//! canonical records, writing and re-reading the consolidated file,
//! generating synthetic exports and computing filtered dashboard views.

pub mod consolidated;
pub mod generator;
pub mod pipeline;
pub mod reader;
pub mod sources;
pub mod view;

pub use adspend_core as core;
