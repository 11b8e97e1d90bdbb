//! Fixed on-disk layout of a project directory.
//!
//! Raw exports live under `data_raw/` and the consolidated file under
//! `data_clean/`, both relative to a project root (the current directory
//! unless `--project-dir` says otherwise).

use std::path::{Path, PathBuf};

/// Directory holding the three raw platform exports.
pub const RAW_DIR: &str = "data_raw";

/// Directory holding the consolidated output.
pub const CLEAN_DIR: &str = "data_clean";

/// File name of the consolidated canonical CSV.
pub const CONSOLIDATED_FILE: &str = "marketing_consolidado.csv";

/// Resolves the fixed relative layout under a chosen project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/data_raw`
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join(RAW_DIR)
    }

    /// `<root>/data_clean`
    pub fn clean_dir(&self) -> PathBuf {
        self.root.join(CLEAN_DIR)
    }

    /// `<root>/data_clean/marketing_consolidado.csv`
    pub fn consolidated(&self) -> PathBuf {
        self.clean_dir().join(CONSOLIDATED_FILE)
    }
}
