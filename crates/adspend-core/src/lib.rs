//! Core domain layer for adspend.
//!
//! Holds the canonical record model shared by the pipeline and the
//! dashboard, the null-propagating metric arithmetic, the error type, text
//! formatting helpers, CLI settings with last-used persistence, and the
//! fixed project directory layout.

pub mod error;
pub mod formatting;
pub mod metrics;
pub mod models;
pub mod paths;
pub mod settings;

pub use error::{AdspendError, Result};
pub use models::{CanonicalRecord, Platform};
