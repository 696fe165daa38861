//! Turns a batch of TASTER session records into the study's CSV reports:
//! total play time per participant and per-wave performance per participant.

mod archive;
mod correction;
mod duration;
mod error;
mod grouping;
mod input;
mod performance;
mod timestamp;

pub use archive::{
    archive_file_name, build_reports, performance_file_name, process, ArchiveEntry,
    ArchiveWriter, MemoryArchive, ReportBundle, DURATION_FILE, PERFORMANCE_FOLDER,
};
pub use correction::{
    corrected_block_length, round1_cutoff, CONTROL_BLOCK_LENGTH, ROUND1_CONTROL_IDS,
    ROUND1_CUTOFF_UNIX_SECS,
};
pub use duration::{
    build_duration_report, format_minutes, sum_wave_durations_ms, DURATION_HEADER,
    DURATION_SENTINEL_MS,
};
pub use error::{ProcessError, ProcessErrorKind};
pub use grouping::{group, GroupedDataset};
pub use input::{dataset_from_value, parse_dataset};
pub use performance::{build_performance_report, DifficultySetting, PERFORMANCE_HEADER};
pub use timestamp::parse_created_at;
