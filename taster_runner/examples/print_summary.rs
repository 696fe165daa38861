use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dataset = taster_runner::load_dataset_from_path(args.path)?;
    let grouped = taster_process::group(&dataset);
    println!("participants={}", grouped.len());
    println!("sessions={}", grouped.total_sessions());
    for (id, sessions) in grouped.iter() {
        println!("{id}={}", sessions.len());
    }
    Ok(())
}
