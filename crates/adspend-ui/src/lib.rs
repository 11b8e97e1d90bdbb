//! Terminal UI layer for the marketing spend dashboard.
//!
//! Provides themes, the header and platform share components, KPI and filter
//! bars, charts, the detailed records table, and the main application event
//! loop built on top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod kpi_view;
pub mod table_view;
pub mod themes;

pub use adspend_core as core;
