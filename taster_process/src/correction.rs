use chrono::{DateTime, Duration, Utc};
use taster_schema::SessionRecord;

use crate::{timestamp::parse_created_at, ProcessError};

// Round 1 of the evaluation ran before 2016-03-01 and recorded the wrong
// block length for its control group. Control-group blocks are always 12.
pub const ROUND1_CONTROL_IDS: [&str; 3] = ["6633", "5697", "7535"];
pub const CONTROL_BLOCK_LENGTH: i64 = 12;

/// 2016-03-01T00:00:00Z as Unix seconds.
pub const ROUND1_CUTOFF_UNIX_SECS: i64 = 1_456_790_400;

pub fn round1_cutoff() -> DateTime<Utc> {
    // DateTime<Utc>::default() is the Unix epoch
    DateTime::<Utc>::default() + Duration::seconds(ROUND1_CUTOFF_UNIX_SECS)
}

/// Block length to report for `session`. Records created exactly at the
/// cutoff are left as recorded.
pub fn corrected_block_length(session: &SessionRecord) -> Result<i64, ProcessError> {
    if !ROUND1_CONTROL_IDS.contains(&session.player_id.as_str()) {
        return Ok(session.block_length);
    }

    let created = parse_created_at(&session.created_at)
        .map_err(|e| e.with_player(&session.player_id))?;
    if created < round1_cutoff() {
        log::debug!(
            "player {}: block length {} corrected to {}",
            session.player_id,
            session.block_length,
            CONTROL_BLOCK_LENGTH
        );
        Ok(CONTROL_BLOCK_LENGTH)
    } else {
        Ok(session.block_length)
    }
}
