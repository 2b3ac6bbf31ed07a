//! Bulk lookup responses
//!
//! Both ExAC bulk endpoints answer with a JSON object keyed by variant id.
//! Entries are kept as raw JSON and read through accessors that return an
//! explicit absent state instead of failing.

use crate::core::{Consequence, Frequency};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Response of the frequency lookup: `{id: {"allele_freq": f64, ...}}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FrequencyResponse {
    entries: HashMap<String, Value>,
}

impl FrequencyResponse {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// External allele frequency, `None` if the id, the field or a numeric
    /// value is absent
    ///
    /// Integral JSON numbers (`1`, `0`) stay integers; anything with a
    /// fraction or exponent is a decimal.
    pub fn allele_freq(&self, id: &str) -> Option<Frequency> {
        let value = self.entries.get(id)?.get("allele_freq")?;
        match value.as_i64() {
            Some(n) => Some(Frequency::Integer(n)),
            None => value.as_f64().map(Frequency::Decimal),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Response of the consequence lookup: `{id: {"consequence": ..., ...}}`
///
/// The consequence set arrives ranked by severity, either as an array of
/// labels or as an object keyed by label. Object key order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ConsequenceResponse {
    entries: HashMap<String, Value>,
}

impl ConsequenceResponse {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Highest-ranked consequence for `id`
    pub fn consequence(&self, id: &str) -> Consequence {
        let Some(value) = self.entries.get(id).and_then(|entry| entry.get("consequence")) else {
            return Consequence::Missing;
        };

        match value {
            Value::Null => Consequence::Unknown,
            Value::Array(items) => items.first().map_or(Consequence::Unknown, |item| {
                Consequence::Known(label(item))
            }),
            Value::Object(map) => map
                .keys()
                .next()
                .map_or(Consequence::Unknown, |key| Consequence::Known(key.clone())),
            Value::String(s) if s.is_empty() => Consequence::Unknown,
            other => Consequence::Known(label(other)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn label(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allele_freq() {
        let freq = FrequencyResponse::from_json(
            r#"{"1-5-A-T": {"allele_freq": 0.0123, "rsid": "rs1"}, "1-6-A-T": {}, "1-7-A-T": null}"#,
        )
        .unwrap();

        assert_eq!(freq.len(), 3);
        assert_eq!(freq.allele_freq("1-5-A-T"), Some(Frequency::Decimal(0.0123)));
        assert_eq!(freq.allele_freq("1-6-A-T"), None);
        assert_eq!(freq.allele_freq("1-7-A-T"), None);
        assert_eq!(freq.allele_freq("1-8-A-T"), None);
    }

    #[test]
    fn test_allele_freq_decimal_one_stays_decimal() {
        let freq = FrequencyResponse::from_json(r#"{"a": {"allele_freq": 1.0}}"#).unwrap();
        assert_eq!(freq.allele_freq("a"), Some(Frequency::Decimal(1.0)));
    }

    #[test]
    fn test_allele_freq_null_and_integer() {
        let freq = FrequencyResponse::from_json(
            r#"{"a": {"allele_freq": null}, "b": {"allele_freq": 1}}"#,
        )
        .unwrap();
        assert_eq!(freq.allele_freq("a"), None);
        assert_eq!(freq.allele_freq("b"), Some(Frequency::Integer(1)));
    }

    #[test]
    fn test_consequence_array() {
        let cons = ConsequenceResponse::from_json(
            r#"{"a": {"consequence": ["stop_gained", "missense_variant"]}}"#,
        )
        .unwrap();
        assert_eq!(cons.consequence("a"), Consequence::Known("stop_gained".into()));
    }

    #[test]
    fn test_consequence_object_keeps_service_order() {
        let cons = ConsequenceResponse::from_json(
            r#"{"a": {"consequence": {"splice_region_variant": {"GENE": ["T1"]}, "intron_variant": {}}}}"#,
        )
        .unwrap();
        assert_eq!(
            cons.consequence("a"),
            Consequence::Known("splice_region_variant".into())
        );
    }

    #[test]
    fn test_consequence_unknown_and_missing() {
        let cons = ConsequenceResponse::from_json(
            r#"{"null": {"consequence": null}, "empty": {"consequence": []},
                "empty_obj": {"consequence": {}}, "no_key": {"allele_freq": 0.1}}"#,
        )
        .unwrap();

        assert_eq!(cons.consequence("null"), Consequence::Unknown);
        assert_eq!(cons.consequence("empty"), Consequence::Unknown);
        assert_eq!(cons.consequence("empty_obj"), Consequence::Unknown);
        assert_eq!(cons.consequence("no_key"), Consequence::Missing);
        assert_eq!(cons.consequence("absent"), Consequence::Missing);
    }
}
