use serde_json::Value as Json;

use crate::error::Result;
use crate::models::{object_from_json, Dataset, Manager, MonthData};

/// Look up `data.<field>` and hand back its elements, or nothing when the
/// field is missing or not an array.
fn data_array<'a>(raw: &'a Json, field: &str) -> &'a [Json] {
    raw.get("data")
        .and_then(|d| d.get(field))
        .and_then(Json::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Turn a decoded API payload into typed managers and the aggregate row.
///
/// Manager records are read field by field and never rejected: a record that
/// is not an object comes through as an all-default manager. Aggregate
/// entries that are `null` are dropped, so the surviving entries keep their
/// relative order but can shift off their calendar position.
pub fn normalize(raw: &Json) -> Dataset {
    let managers: Vec<Manager> = data_array(raw, "table")
        .iter()
        .map(|item| {
            if !item.is_object() {
                tracing::warn!("manager record is not an object: {item}");
            }
            object_from_json(item.clone()).unwrap_or_default()
        })
        .collect();

    let total: Vec<MonthData> = data_array(raw, "total")
        .iter()
        .filter(|item| !item.is_null())
        .map(|item| object_from_json(item.clone()).unwrap_or_default())
        .collect();

    tracing::debug!(managers = managers.len(), total = total.len(), "normalized payload");
    Dataset { managers, total }
}

pub fn normalize_str(body: &str) -> Result<Dataset> {
    let raw: Json = serde_json::from_str(body)?;
    Ok(normalize(&raw))
}
