use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Canonical participant key.
///
/// Strings are kept verbatim. Numbers and booleans are rendered to their
/// decimal/text form, so `5697` and `"5697"` name the same participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl TryFrom<Value> for PlayerId {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(number_text(&n))),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Null => Err("playerId must not be null".to_string()),
            other => Err(format!("playerId must be a scalar, got {other}")),
        }
    }
}

/// Renders a JSON number as plain decimal text. Integral floats drop the
/// fractional part (`12.0` -> `12`).
pub fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub results: Vec<SessionRecord>,
}

/// One completed trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "blockLength")]
    pub block_length: i64,
    /// JSON-encoded list of [`WaveRecord`], decoded on demand.
    pub waves: String,
}

impl SessionRecord {
    pub fn decode_waves(&self) -> serde_json::Result<Vec<WaveRecord>> {
        WaveRecord::decode_list(&self.waves)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveRecord {
    /// Milliseconds. Not always a number in recorded data.
    #[serde(default)]
    pub duration: Value,
    #[serde(rename = "difficultySetting", default)]
    pub difficulty_setting: Option<String>,
    #[serde(rename = "successRate", default)]
    pub success_rate: Option<Value>,
}

impl WaveRecord {
    pub fn decode_list(encoded: &str) -> serde_json::Result<Vec<WaveRecord>> {
        serde_json::from_str(encoded)
    }

    pub fn duration_ms(&self) -> Option<f64> {
        self.duration.as_f64()
    }
}
