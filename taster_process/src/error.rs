use taster_schema::PlayerId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessErrorKind {
    InvalidInput,
    MalformedWaveData,
    Timestamp,
    Archive,
}

impl ProcessErrorKind {
    pub(crate) fn from_code(code: &'static str) -> Self {
        match code {
            "E1001" | "E1002" | "E1003" => Self::InvalidInput,
            "E2001" | "E2002" => Self::MalformedWaveData,
            "E3001" => Self::Timestamp,
            "E4001" => Self::Archive,

            // default: treat unknown codes as InvalidInput.
            _ => Self::InvalidInput,
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct ProcessError {
    pub code: &'static str,
    pub kind: ProcessErrorKind,
    pub message: String,

    pub player_id: Option<PlayerId>,
    pub record_index: Option<usize>,
    pub game: Option<usize>,
    pub wave: Option<usize>,
    pub context: Option<String>,
}

impl ProcessError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: ProcessErrorKind::from_code(code),
            message: message.into(),

            player_id: None,
            record_index: None,
            game: None,
            wave: None,
            context: None,
        }
    }

    pub fn with_player(mut self, player_id: &PlayerId) -> Self {
        self.player_id = Some(player_id.clone());
        self
    }

    pub fn with_record_index(mut self, index: usize) -> Self {
        self.record_index = Some(index);
        self
    }

    pub fn with_game(mut self, game: usize) -> Self {
        self.game = Some(game);
        self
    }

    pub fn with_wave(mut self, wave: usize) -> Self {
        self.wave = Some(wave);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind == ProcessErrorKind::InvalidInput
    }

    pub fn is_malformed_wave_data(&self) -> bool {
        self.kind == ProcessErrorKind::MalformedWaveData
    }
}
