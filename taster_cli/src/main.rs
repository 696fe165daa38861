mod archive;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use taster_schema::PlayerId;

use archive::{DirectoryArchive, ZipFileArchive};

#[derive(Debug, Parser)]
#[command(name = "taster")]
#[command(about = "TASTER session report exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write duration.csv and per-participant performance reports
    Export {
        input: PathBuf,
        /// Zip file to write (default: current GMT time + .zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the reports into this directory instead of a zip file
        #[arg(long, conflicts_with = "output")]
        dir: Option<PathBuf>,
    },
    /// Print the duration report
    Duration { input: PathBuf },
    /// Print one participant's performance report
    Performance { input: PathBuf, player_id: String },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Export { input, output, dir } => {
            let dataset = taster_runner::load_dataset_from_path(&input)?;

            if let Some(dir) = dir {
                let archive = DirectoryArchive::create(&dir)
                    .with_context(|| format!("failed to create: {}", dir.display()))?;
                taster_process::process(&dataset, archive)
                    .with_context(|| format!("export failed: {}", input.display()))?;
                log::info!("reports written to {}", dir.display());
                return Ok(());
            }

            let bytes = taster_process::process(&dataset, ZipFileArchive::new())
                .with_context(|| format!("export failed: {}", input.display()))?;
            let out_path = output.unwrap_or_else(default_output_path);
            fs::write(&out_path, bytes)
                .with_context(|| format!("failed to write: {}", out_path.display()))?;
            log::info!("archive written to {}", out_path.display());
        }
        Command::Duration { input } => {
            let grouped = load_grouped(&input)?;
            let csv = taster_process::build_duration_report(&grouped)
                .with_context(|| format!("duration report failed: {}", input.display()))?;
            print!("{csv}");
        }
        Command::Performance { input, player_id } => {
            let grouped = load_grouped(&input)?;
            let id = PlayerId::new(player_id);
            let sessions = grouped
                .get(&id)
                .with_context(|| format!("unknown player id: {id}"))?;
            let csv = taster_process::build_performance_report(sessions)
                .with_context(|| format!("performance report failed: {id}"))?;
            print!("{csv}");
        }
    }

    Ok(())
}

fn load_grouped(input: &Path) -> anyhow::Result<taster_process::GroupedDataset> {
    let dataset = taster_runner::load_dataset_from_path(input)?;
    Ok(taster_process::group(&dataset))
}

fn default_output_path() -> PathBuf {
    PathBuf::from(taster_process::archive_file_name(Utc::now()))
}
