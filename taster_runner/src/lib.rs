use std::{fs, path::Path};

use anyhow::Context;
use taster_schema::Dataset;

pub fn load_dataset_from_path(path: impl AsRef<Path>) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let dataset = taster_process::parse_dataset(&text)
        .with_context(|| format!("failed to parse dataset json: {}", path.display()))?;
    log::info!(
        "loaded {} result records from {}",
        dataset.results.len(),
        path.display()
    );
    Ok(dataset)
}

pub fn load_dataset_from_str(json: &str) -> anyhow::Result<Dataset> {
    let dataset = taster_process::parse_dataset(json).context("failed to parse dataset json")?;
    Ok(dataset)
}
