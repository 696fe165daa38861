use std::{convert::Infallible, fmt};

use chrono::{DateTime, Utc};
use taster_schema::{Dataset, PlayerId};

use crate::{
    duration::build_duration_report, grouping::group, performance::build_performance_report,
    ProcessError,
};

pub const DURATION_FILE: &str = "duration.csv";
pub const PERFORMANCE_FOLDER: &str = "performance-data";

/// Sink for finished report files. Paths use `/` separators and are
/// relative to the archive root.
pub trait ArchiveWriter {
    type Error: fmt::Display;

    fn write(&mut self, path: &str, content: &str) -> Result<(), Self::Error>;
    fn write_folder(&mut self, name: &str) -> Result<(), Self::Error>;
    fn finalize(self) -> Result<Vec<u8>, Self::Error>;
}

pub fn performance_file_name(id: &PlayerId) -> String {
    format!("performance-{id}.csv")
}

/// Every report text for one dataset, computed before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBundle {
    pub duration_csv: String,
    pub performance: Vec<(PlayerId, String)>,
}

impl ReportBundle {
    pub fn write_to<A: ArchiveWriter>(&self, archive: &mut A) -> Result<(), ProcessError> {
        archive.write(DURATION_FILE, &self.duration_csv).map_err(archive_error)?;
        archive.write_folder(PERFORMANCE_FOLDER).map_err(archive_error)?;
        for (id, csv) in &self.performance {
            let path = format!("{PERFORMANCE_FOLDER}/{}", performance_file_name(id));
            archive
                .write(&path, csv)
                .map_err(|e| archive_error(e).with_player(id))?;
        }
        Ok(())
    }
}

pub fn build_reports(dataset: &Dataset) -> Result<ReportBundle, ProcessError> {
    let grouped = group(dataset);
    let duration_csv = build_duration_report(&grouped)?;

    let mut performance = Vec::with_capacity(grouped.len());
    for (id, sessions) in grouped.iter() {
        performance.push((id.clone(), build_performance_report(sessions)?));
    }

    log::info!(
        "built reports for {} participants ({} sessions)",
        grouped.len(),
        grouped.total_sessions()
    );
    Ok(ReportBundle {
        duration_csv,
        performance,
    })
}

/// Runs the whole pipeline and returns the finalized archive bytes. The
/// archive is untouched when any report fails.
pub fn process<A: ArchiveWriter>(
    dataset: &Dataset,
    mut archive: A,
) -> Result<Vec<u8>, ProcessError> {
    let bundle = build_reports(dataset)?;
    bundle.write_to(&mut archive)?;
    archive.finalize().map_err(archive_error)
}

/// `Sun, 18 Oct 2026 08:34:00 GMT.zip`
pub fn archive_file_name(now: DateTime<Utc>) -> String {
    format!("{}.zip", now.format("%a, %d %b %Y %H:%M:%S GMT"))
}

fn archive_error(e: impl fmt::Display) -> ProcessError {
    ProcessError::new("E4001", format!("archive write failed: {e}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    Folder(String),
    File { path: String, content: String },
}

/// Keeps entries in write order. `finalize` yields a text listing of the
/// entries, one path per line, folders with a trailing `/`.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<ArchiveEntry>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            ArchiveEntry::File { path: p, content } if p == path => Some(content.as_str()),
            _ => None,
        })
    }
}

impl ArchiveWriter for &mut MemoryArchive {
    type Error = Infallible;

    fn write(&mut self, path: &str, content: &str) -> Result<(), Self::Error> {
        self.entries.push(ArchiveEntry::File {
            path: path.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }

    fn write_folder(&mut self, name: &str) -> Result<(), Self::Error> {
        self.entries.push(ArchiveEntry::Folder(name.to_string()));
        Ok(())
    }

    fn finalize(self) -> Result<Vec<u8>, Self::Error> {
        let mut listing = String::new();
        for entry in &self.entries {
            match entry {
                ArchiveEntry::Folder(name) => listing.push_str(&format!("{name}/\n")),
                ArchiveEntry::File { path, .. } => listing.push_str(&format!("{path}\n")),
            }
        }
        Ok(listing.into_bytes())
    }
}
