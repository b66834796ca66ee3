use serde::{Deserialize, Deserializer};

use crate::window::MONTHS_IN_YEAR;

/// One side (plan or fact) of a month's metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Value {
    #[serde(deserialize_with = "lenient_number")]
    pub income: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub active_partners: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthData {
    #[serde(deserialize_with = "lenient_object")]
    pub plan: Option<Value>,
    #[serde(deserialize_with = "lenient_object")]
    pub fact: Option<Value>,
}

#[cfg(test)]
impl MonthData {
    pub fn new(plan: Value, fact: Value) -> Self {
        Self {
            plan: Some(plan),
            fact: Some(fact),
        }
    }
}

/// Calendar months for one manager, index 0 = January.
pub type Months = [Option<MonthData>; MONTHS_IN_YEAR];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manager {
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
    #[allow(dead_code)]
    #[serde(deserialize_with = "lenient_int")]
    pub admin_id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub admin_name: String,
    #[serde(deserialize_with = "lenient_int")]
    pub year: i64,
    #[serde(deserialize_with = "twelve_months")]
    pub months: Months,
}

/// Normalized payload: managers plus the aggregate row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub managers: Vec<Manager>,
    pub total: Vec<MonthData>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty() && self.total.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers: wrong types degrade to absent/default, never fail
// ---------------------------------------------------------------------------

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_f64())
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_i64()
        .or_else(|| raw.as_f64().map(|f| f as i64))
        .unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(object_from_json(raw))
}

fn twelve_months<'de, D>(deserializer: D) -> Result<Months, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let mut months: Months = [None; MONTHS_IN_YEAR];
    if let serde_json::Value::Array(items) = raw {
        for (slot, item) in months.iter_mut().zip(items) {
            *slot = object_from_json(item);
        }
    }
    Ok(months)
}

/// Decode an object-shaped JSON value; anything that is not an object is absent.
pub(crate) fn object_from_json<T: serde::de::DeserializeOwned>(raw: serde_json::Value) -> Option<T> {
    if raw.is_object() {
        serde_json::from_value(raw).ok()
    } else {
        None
    }
}
