use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{IndicatorColor, ProbabilityBand};

/// Label used when the service response carries no usable diagnosis.
pub const UNKNOWN_DIAGNOSIS: &str = "unknown";

/// Name stored when the user saves a result without naming the patient.
pub const ANONYMOUS_PATIENT: &str = "Anonymous";

/// Percentage + label derived from one inference response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisVerdict {
    pub probability_percent: f64,
    pub diagnosis_label: String,
}

impl DiagnosisVerdict {
    /// Build a verdict from an already-scaled percentage. Clamped to [0, 100].
    pub fn new(probability_percent: f64, diagnosis_label: impl Into<String>) -> Self {
        Self {
            probability_percent: clamp_percent(probability_percent),
            diagnosis_label: diagnosis_label.into(),
        }
    }

    /// Build a verdict from the model's raw [0, 1] probability.
    pub fn from_probability(probability: f64, diagnosis_label: impl Into<String>) -> Self {
        Self::new(probability * 100.0, diagnosis_label)
    }

    /// Whole percentage as shown in the progress ring (truncated).
    pub fn display_percent(&self) -> i64 {
        self.probability_percent as i64
    }

    pub fn band(&self) -> ProbabilityBand {
        ProbabilityBand::from_percent(self.display_percent())
    }

    pub fn color(&self) -> IndicatorColor {
        self.band().color()
    }
}

/// Clamp a percentage into [0, 100]. Non-finite values become 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Trimmed patient name, or the anonymous placeholder if nothing is left.
pub fn normalize_patient_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS_PATIENT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A saved verdict in the local history.
///
/// Field names and date format are the persisted wire format; see
/// `crate::history::RecordStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub patient_name: String,
    #[serde(with = "record_date")]
    pub date: DateTime<Utc>,
    pub probability: f64,
    pub diagnosis: String,
}

impl DiagnosisRecord {
    pub fn new(patient_name: &str, verdict: &DiagnosisVerdict, date: DateTime<Utc>) -> Self {
        Self {
            patient_name: normalize_patient_name(patient_name),
            date,
            probability: clamp_percent(verdict.probability_percent),
            diagnosis: verdict.diagnosis_label.clone(),
        }
    }

    /// One history line: name, local date, whole percentage, label.
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | Probability of Parkinson's: {}% | Diagnosis show as: {}",
            self.patient_name,
            self.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            self.probability as i64,
            self.diagnosis,
        )
    }
}

/// RFC 3339 on write. On read also accepts Unix epoch seconds, which older
/// exports used.
mod record_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    // Read through `Value` so exact-precision numbers arrive as numbers.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Value::deserialize(d)? {
            Value::String(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(de::Error::custom),
            Value::Number(number) => {
                let secs = number
                    .as_f64()
                    .ok_or_else(|| de::Error::custom(format!("epoch out of range: {number}")))?;
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round() as u32;
                DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
                    .ok_or_else(|| de::Error::custom(format!("epoch out of range: {secs}")))
            }
            other => Err(de::Error::custom(format!(
                "expected an RFC 3339 string or epoch seconds, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn verdict_scales_raw_probability() {
        let v = DiagnosisVerdict::from_probability(0.73, "low risk");
        assert!((v.probability_percent - 73.0).abs() < 1e-9);
        assert_eq!(v.diagnosis_label, "low risk");
    }

    #[test]
    fn verdict_clamps_above_one() {
        let v = DiagnosisVerdict::from_probability(1.4, "x");
        assert_eq!(v.probability_percent, 100.0);
    }

    #[test]
    fn verdict_clamps_negative() {
        let v = DiagnosisVerdict::from_probability(-0.2, "x");
        assert_eq!(v.probability_percent, 0.0);
    }

    #[test]
    fn non_finite_percent_is_zero() {
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 0.0);
    }

    #[test]
    fn display_percent_truncates() {
        let v = DiagnosisVerdict::new(61.9, "x");
        assert_eq!(v.display_percent(), 61);
        assert_eq!(v.band(), ProbabilityBand::High);
        assert_eq!(v.color(), IndicatorColor::Orange);
    }

    #[test]
    fn boundary_20_point_9_is_very_low() {
        let v = DiagnosisVerdict::new(20.9, "x");
        assert_eq!(v.band(), ProbabilityBand::VeryLow);
    }

    #[test]
    fn whitespace_name_becomes_placeholder() {
        assert_eq!(normalize_patient_name("   "), ANONYMOUS_PATIENT);
        assert_eq!(normalize_patient_name("\n\t"), ANONYMOUS_PATIENT);
        assert_eq!(normalize_patient_name(""), ANONYMOUS_PATIENT);
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_patient_name("  Aigerim  "), "Aigerim");
    }

    #[test]
    fn record_serializes_camel_case() {
        let date = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let record = DiagnosisRecord::new("Dana", &DiagnosisVerdict::new(82.0, "elevated risk"), date);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["patientName"], "Dana");
        assert_eq!(json["date"], "2025-03-14T09:30:00Z");
        assert_eq!(json["probability"], 82.0);
        assert_eq!(json["diagnosis"], "elevated risk");
    }

    #[test]
    fn record_preserves_subsecond_date() {
        let date = Utc.timestamp_opt(1_741_944_600, 123_456_789).unwrap();
        let record = DiagnosisRecord::new("Dana", &DiagnosisVerdict::new(10.0, "x"), date);
        let json = serde_json::to_string(&record).unwrap();
        let back: DiagnosisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_accepts_epoch_date() {
        let json = r#"{"patientName":"A","date":1741944600,"probability":5.0,"diagnosis":"ok"}"#;
        let record: DiagnosisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, Utc.timestamp_opt(1_741_944_600, 0).unwrap());
    }

    #[test]
    fn record_rejects_garbage_date() {
        let json = r#"{"patientName":"A","date":"yesterday","probability":5.0,"diagnosis":"ok"}"#;
        assert!(serde_json::from_str::<DiagnosisRecord>(json).is_err());
    }

    #[test]
    fn record_rejects_non_scalar_date() {
        let json = r#"{"patientName":"A","date":[2025,3,14],"probability":5.0,"diagnosis":"ok"}"#;
        assert!(serde_json::from_str::<DiagnosisRecord>(json).is_err());
    }

    #[test]
    fn record_clamps_probability() {
        let verdict = DiagnosisVerdict {
            probability_percent: 140.0,
            diagnosis_label: "x".into(),
        };
        let record = DiagnosisRecord::new("A", &verdict, Utc::now());
        assert_eq!(record.probability, 100.0);
    }

    #[test]
    fn summary_line_contains_whole_percent() {
        let date = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let record = DiagnosisRecord::new("Dana", &DiagnosisVerdict::new(82.7, "elevated risk"), date);
        let line = record.summary();
        assert!(line.starts_with("Dana | "));
        assert!(line.contains("Probability of Parkinson's: 82%"));
        assert!(line.ends_with("Diagnosis show as: elevated risk"));
    }
}
