use serde_json::Value;
use taster_schema::{number_text, SessionRecord, WaveRecord};

use crate::{correction::corrected_block_length, timestamp::parse_created_at, ProcessError};

pub const PERFORMANCE_HEADER: &str =
    "Game,Block length,Wave,Total number of creatures,Percentage targets,Uniformity,Success rate";

/// Decoded `difficultySetting`. Fields stay as recorded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultySetting<'a> {
    pub total_creatures: &'a str,
    pub percentage_targets: &'a str,
    pub uniformity: &'a str,
}

impl<'a> DifficultySetting<'a> {
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(':');
        let total_creatures = parts.next()?;
        let percentage_targets = parts.next()?;
        let uniformity = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            total_creatures,
            percentage_targets,
            uniformity,
        })
    }
}

/// One participant's per-wave report. Games are numbered from 1 in
/// ascending `createdAt` order; the input slice is left untouched.
pub fn build_performance_report(sessions: &[SessionRecord]) -> Result<String, ProcessError> {
    let mut dated = Vec::with_capacity(sessions.len());
    for session in sessions {
        let created = parse_created_at(&session.created_at)
            .map_err(|e| e.with_player(&session.player_id))?;
        dated.push((created, session));
    }
    // stable: equal timestamps keep bucket order
    dated.sort_by_key(|(created, _)| *created);

    let mut csv = String::from(PERFORMANCE_HEADER);
    csv.push('\n');

    for (g, (_, session)) in dated.iter().enumerate() {
        let game = g + 1;
        let waves = session.decode_waves().map_err(|e| {
            ProcessError::new("E2001", format!("invalid waves data: {e}"))
                .with_player(&session.player_id)
                .with_game(game)
        })?;
        let block_length = corrected_block_length(session).map_err(|e| e.with_game(game))?;

        for (w, wave) in waves.iter().enumerate() {
            let wave_no = w + 1;
            let setting = difficulty_setting(wave).map_err(|e| {
                e.with_player(&session.player_id)
                    .with_game(game)
                    .with_wave(wave_no)
            })?;
            csv.push_str(&format!(
                "{game},{block_length},{wave_no},{},{},{},{}\n",
                setting.total_creatures,
                setting.percentage_targets,
                setting.uniformity,
                success_rate_text(wave.success_rate.as_ref()),
            ));
        }
    }
    Ok(csv)
}

fn difficulty_setting(wave: &WaveRecord) -> Result<DifficultySetting<'_>, ProcessError> {
    let Some(raw) = wave.difficulty_setting.as_deref() else {
        return Err(ProcessError::new("E2002", "missing difficultySetting"));
    };
    DifficultySetting::parse(raw).ok_or_else(|| {
        ProcessError::new(
            "E2002",
            format!("difficultySetting must have exactly three ':' fields, got {raw:?}"),
        )
        .with_context(raw.to_string())
    })
}

fn success_rate_text(v: Option<&Value>) -> String {
    match v {
        None => String::new(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
