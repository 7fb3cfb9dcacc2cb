use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::AtlasError;
use super::graph::{Atlas, Mark, Marks, SystemRecord};

#[derive(Clone, Debug, Deserialize)]
struct RawMark {
    #[serde(default)]
    systems: Vec<String>,
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, AtlasError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(object) => Ok(object),
        _ => Err(AtlasError::NotAnObject),
    }
}

/// Parses a system document. Every entry must carry `name` and `position`;
/// one malformed entry rejects the whole document.
pub(super) fn parse_atlas_document(raw: &str) -> Result<Atlas, AtlasError> {
    let object = parse_object(raw)?;
    let mut records = Vec::with_capacity(object.len());

    for (id, value) in object {
        let mut record = SystemRecord::deserialize(value).map_err(|source| AtlasError::Entry {
            id: id.clone(),
            source,
        })?;
        record.id = id;
        records.push(record);
    }

    Ok(Atlas::from_records(records))
}

pub(super) fn parse_marks_document(raw: &str) -> Result<Marks, AtlasError> {
    let object = parse_object(raw)?;
    let mut marks = Vec::with_capacity(object.len());

    for (id, value) in object {
        let entry = RawMark::deserialize(value).map_err(|source| AtlasError::Entry {
            id: id.clone(),
            source,
        })?;
        marks.push(Mark {
            id,
            systems: entry.systems,
        });
    }

    Ok(Marks::new(marks))
}
