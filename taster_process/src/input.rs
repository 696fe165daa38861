use serde_json::Value;
use taster_schema::{Dataset, SessionRecord};

use crate::ProcessError;

pub fn parse_dataset(json: &str) -> Result<Dataset, ProcessError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ProcessError::new("E1001", format!("invalid dataset json: {e}")))?;
    dataset_from_value(value)
}

/// Checks the `results` sequence first so a missing or wrongly-typed field is
/// reported as such, not as a generic decode failure.
pub fn dataset_from_value(value: Value) -> Result<Dataset, ProcessError> {
    let Value::Object(mut root) = value else {
        return Err(ProcessError::new("E1001", "dataset must be a json object"));
    };

    let results = match root.remove("results") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ProcessError::new(
                "E1002",
                format!("results must be an array, got {}", value_type_name(&other)),
            ));
        }
        None => return Err(ProcessError::new("E1002", "missing results")),
    };

    let mut records = Vec::with_capacity(results.len());
    for (i, item) in results.into_iter().enumerate() {
        let record: SessionRecord = serde_json::from_value(item).map_err(|e| {
            ProcessError::new("E1003", format!("invalid result record at index {i}: {e}"))
                .with_record_index(i)
        })?;
        records.push(record);
    }

    log::debug!("decoded {} result records", records.len());
    Ok(Dataset { results: records })
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
