use taster_schema::SessionRecord;

use crate::{grouping::GroupedDataset, ProcessError};

/// Wave durations at or above this many milliseconds are corrupt recordings
/// (one known wave logged > 10,000,000 ms) and are left out of the total.
pub const DURATION_SENTINEL_MS: f64 = 10_000_000.0;

pub const DURATION_HEADER: &str = "id,duration";

// ms per hundredth of a minute
const MS_PER_CENTIMINUTE: f64 = 600.0;

pub fn build_duration_report(grouped: &GroupedDataset) -> Result<String, ProcessError> {
    let mut csv = String::from(DURATION_HEADER);
    csv.push('\n');

    for (id, sessions) in grouped.iter() {
        let total_ms = sum_wave_durations_ms(sessions)?;
        csv.push_str(&format!("{id},{}\n", format_minutes(total_ms)));
    }
    Ok(csv)
}

/// Sums every numeric wave duration below the sentinel across `sessions`.
pub fn sum_wave_durations_ms(sessions: &[SessionRecord]) -> Result<f64, ProcessError> {
    let mut total = 0.0;
    for (i, session) in sessions.iter().enumerate() {
        let waves = session.decode_waves().map_err(|e| {
            ProcessError::new("E2001", format!("invalid waves data: {e}"))
                .with_player(&session.player_id)
                .with_context(format!("session {} ({})", i + 1, session.created_at))
        })?;

        for (w, wave) in waves.iter().enumerate() {
            match wave.duration_ms() {
                Some(ms) if ms < DURATION_SENTINEL_MS => total += ms,
                Some(ms) => log::debug!(
                    "player {}: skipping outlier duration {ms} (session {}, wave {})",
                    session.player_id,
                    i + 1,
                    w + 1
                ),
                None => log::debug!(
                    "player {}: skipping non-numeric duration {} (session {}, wave {})",
                    session.player_id,
                    wave.duration,
                    i + 1,
                    w + 1
                ),
            }
        }
    }
    Ok(total)
}

/// Milliseconds as minutes with two decimals, halves rounded away from zero.
pub fn format_minutes(ms: f64) -> String {
    // one division keeps exact .5 ties exact before rounding
    let rounded = (ms / MS_PER_CENTIMINUTE).round() / 100.0;
    // avoid "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}
