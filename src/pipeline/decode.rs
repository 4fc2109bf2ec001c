//! Typed, lenient decode of the inference service's reply.
//!
//! The service contract is loose: either field may be missing or carry the
//! wrong JSON type. Neither case fails the diagnosis; each field falls back
//! to its default (`0` probability, `"unknown"` label).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{DiagnosisVerdict, UNKNOWN_DIAGNOSIS};
use crate::upload::RawFields;

/// Fields the pipeline reads from the reply. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct InferenceReply {
    /// Raw model output, expected in [0, 1].
    #[serde(default, deserialize_with = "number_or_none")]
    probability: Option<f64>,
    #[serde(default, deserialize_with = "string_or_none")]
    diagnosis: Option<String>,
}

fn number_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

fn string_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Turn the reply's fields into a verdict, substituting defaults.
pub fn decode_verdict(fields: RawFields) -> DiagnosisVerdict {
    let reply: InferenceReply = serde_json::from_value(Value::Object(fields)).unwrap_or_default();

    if reply.probability.is_none() {
        tracing::debug!("Reply has no numeric probability, using 0");
    }
    let label = reply.diagnosis.unwrap_or_else(|| {
        tracing::debug!("Reply has no diagnosis label, using sentinel");
        UNKNOWN_DIAGNOSIS.to_string()
    });

    DiagnosisVerdict::from_probability(reply.probability.unwrap_or(0.0), label)
}
