mod bootstrap;

use anyhow::Result;

use adspend_core::paths::ProjectPaths;
use adspend_core::settings::{Cli, Command, DashboardArgs};
use adspend_data::generator::generate_raw_sources;
use adspend_data::pipeline::run_pipeline;
use adspend_runtime::session::ExplorerSession;
use adspend_ui::app::{App, Screen};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&cli.log_level, cli.log_file.as_ref())?;

    tracing::info!("adspend v{} starting", env!("CARGO_PKG_VERSION"));

    let paths = ProjectPaths::new(&cli.project_dir);
    let command = cli
        .command
        .unwrap_or_else(|| Command::Dashboard(DashboardArgs::default()));

    match command {
        Command::Generate(args) => {
            tracing::info!(rows = args.rows, seed = ?args.seed, "generating raw exports");

            let summary = generate_raw_sources(&paths, args.rows, args.seed)?;
            for file in &summary.files {
                println!(
                    "{}: {} rows written to {}",
                    file.platform,
                    file.rows,
                    file.path.display()
                );
            }
        }

        Command::Etl => {
            tracing::info!(project_dir = %paths.root().display(), "running ETL pipeline");

            let summary = run_pipeline(&paths)?;
            for source in &summary.source_counts {
                println!("{}: {} rows extracted", source.platform, source.rows);
            }
            println!(
                "{} records consolidated into {} (load {:.2}s, write {:.2}s)",
                summary.total_records,
                summary.output_path.display(),
                summary.load_time_seconds,
                summary.write_time_seconds,
            );
        }

        Command::Dashboard(args) => {
            tracing::info!(theme = %args.theme, view = %args.view, "starting dashboard");

            let mut session = ExplorerSession::new(paths.consolidated());
            session.refresh(false);

            let app = App::new(&args.theme, Screen::from_name(&args.view), session);

            // Run the TUI event loop; it exits on 'q' / Ctrl+C inside the TUI.
            // Ctrl+C is also caught at the OS level so a signal delivered
            // outside raw mode still shuts the process down cleanly.
            tokio::select! {
                result = app.run() => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }
    }

    Ok(())
}
