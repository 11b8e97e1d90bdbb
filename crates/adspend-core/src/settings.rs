use clap::{Args, CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Cli ────────────────────────────────────────────────────────────────────────

/// Marketing spend consolidation and interactive exploration
#[derive(Parser, Debug, Clone)]
#[command(
    name = "adspend",
    about = "Consolidates per-platform ad spend exports and explores them in the terminal",
    version
)]
pub struct Cli {
    /// Project directory holding data_raw/ and data_clean/
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write synthetic raw platform exports under data_raw/
    Generate(GenerateArgs),
    /// Consolidate the three raw exports into data_clean/marketing_consolidado.csv
    Etl,
    /// Explore the consolidated data interactively (default)
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Rows to generate per source file
    #[arg(long, default_value = "300")]
    pub rows: usize,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Initial screen
    #[arg(long, default_value = "charts", value_parser = ["charts", "records"])]
    pub view: String,
}

impl Default for DashboardArgs {
    fn default() -> Self {
        DashboardArgs {
            theme: "auto".to_string(),
            view: "charts".to_string(),
        }
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used dashboard parameters saved to `~/.adspend/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl LastUsedParams {
    /// Default location of the persisted params, `~/.adspend/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Same path rooted at `base_dir`; tests point this at a tempdir.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".adspend").join("last_used.json")
    }

    /// Load the persisted params, falling back to `Default` when the file
    /// is absent or does not parse.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Write params to the default path, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Write to an explicit path via a temp file + rename, so a crash
    /// mid-write never leaves a half-written params file behind.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Remove the persisted params file if present.
    pub fn clear() -> Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Remove the file at an explicit path if present.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Cli impl ───────────────────────────────────────────────────────────────────

impl Cli {
    /// Parse CLI arguments, merge dashboard flags with last-used params where
    /// no explicit CLI value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Implementation taking explicit args and config path so tests can run
    /// against a tempdir.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Cli::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut cli = Cli::parse_from(args);

        // No subcommand → launch the dashboard with default args.
        if cli.command.is_none() {
            cli.command = Some(Command::Dashboard(DashboardArgs::default()));
        }

        if cli.debug {
            cli.log_level = "DEBUG".to_string();
        }

        if cli.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return cli;
        }

        // Last-used params only cover dashboard flags; batch subcommands
        // neither read nor write them.
        if let Some(Command::Dashboard(ref mut dash)) = cli.command {
            let last = LastUsedParams::load_from(config_path);
            let sub = matches.subcommand_matches("dashboard");

            if !is_sub_arg_explicitly_set(sub, "theme") {
                if let Some(t) = last.theme {
                    dash.theme = t;
                }
            }
            if !is_sub_arg_explicitly_set(sub, "view") {
                if let Some(v) = last.view {
                    dash.view = v;
                }
            }

            // Persist the effective dashboard params for the next run.
            let params = LastUsedParams {
                theme: Some(dash.theme.clone()),
                view: Some(dash.view.clone()),
            };
            let _ = params.save_to(config_path);
        }

        cli
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line of
/// the given subcommand (not via default value or environment variable).
fn is_sub_arg_explicitly_set(matches: Option<&clap::ArgMatches>, name: &str) -> bool {
    matches
        .map(|m| m.value_source(name) == Some(clap::parser::ValueSource::CommandLine))
        .unwrap_or(false)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
