//! Mapping of a `submit` payload onto a survey row

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use sheet_store::record::ANSWER_COUNT;
use sheet_store::SubmissionRecord;

use crate::error::GatewayError;

/// Build a record from the `data` object; absent fields become empty cells
pub fn record_from_data(data: Option<&Value>, timestamp: DateTime<Utc>) -> Result<SubmissionRecord, GatewayError> {
    let fields = match data {
        Some(Value::Object(fields)) => fields,
        _ => return Err(GatewayError::MissingData),
    };

    let answers: [String; ANSWER_COUNT] = std::array::from_fn(|i| text_field(fields, &format!("q{}", i + 1)));

    Ok(SubmissionRecord {
        timestamp,
        facility: text_field(fields, "facility"),
        position: text_field(fields, "position"),
        name: text_field(fields, "name"),
        answers,
        summary: text_field(fields, "summary"),
    })
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
