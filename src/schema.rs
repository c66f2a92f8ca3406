//! bp.reading.v1 input schema
//!
//! Parsing for the reading payload the engine consumes: a JSON array (the
//! shape the charting UI receives from the server) or NDJSON, one reading
//! per line. Timestamps travel as epoch milliseconds; systolic/diastolic are
//! nested objects carrying at least a `value`.
//!
//! Validation here is advisory only. The engine treats unsorted or
//! out-of-range input as a caller contract violation, never a runtime error;
//! these checks exist so upstream collaborators (and the CLI `validate`
//! command) can catch problems before invoking the core.

use crate::error::ComputeError;
use crate::types::Reading;

/// Current input schema version
pub const SCHEMA_VERSION: &str = "bp.reading.v1";

/// One advisory finding from validation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    /// Zero-based index of the offending reading
    pub index: usize,
    pub message: String,
}

/// Adapter for parsing reading payloads
pub struct ReadingAdapter;

impl ReadingAdapter {
    /// Parse a JSON array of readings
    pub fn parse_array(json: &str) -> Result<Vec<Reading>, ComputeError> {
        let readings: Vec<Reading> = serde_json::from_str(json)?;
        Ok(readings)
    }

    /// Parse NDJSON (newline-delimited JSON), one reading per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<Reading>, ComputeError> {
        let mut readings = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Reading>(trimmed) {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(readings)
    }

    /// Check a parsed reading set against the engine's caller contract.
    ///
    /// Returns one issue per finding; an empty list means the set is clean.
    pub fn validate(readings: &[Reading]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (i, reading) in readings.iter().enumerate() {
            if reading.systolic.value <= 0.0 {
                issues.push(ValidationIssue {
                    index: i,
                    message: format!("non-positive systolic value {}", reading.systolic.value),
                });
            }
            if reading.diastolic.value <= 0.0 {
                issues.push(ValidationIssue {
                    index: i,
                    message: format!("non-positive diastolic value {}", reading.diastolic.value),
                });
            }
            if i > 0 && reading.timestamp < readings[i - 1].timestamp {
                issues.push(ValidationIssue {
                    index: i,
                    message: "timestamp not ascending; trend output will be unspecified"
                        .to_string(),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadingSource;
    use pretty_assertions::assert_eq;

    fn sample_array() -> &'static str {
        r#"[
            {"timestamp": 1609459200000, "systolic": {"value": 132.0, "unit": "mmHg"}, "diastolic": {"value": 85.0, "unit": "mmHg"}, "source": "HOME"},
            {"timestamp": 1609545600000, "systolic": {"value": 128.0}, "diastolic": {"value": 82.0}, "source": "OFFICE"},
            {"timestamp": 1609632000000, "systolic": {"value": 125.0}, "diastolic": {"value": 80.0}, "source": "KIOSK"}
        ]"#
    }

    #[test]
    fn test_parse_array() {
        let readings = ReadingAdapter::parse_array(sample_array()).unwrap();

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].timestamp.timestamp_millis(), 1_609_459_200_000);
        assert_eq!(readings[0].systolic.value, 132.0);
        assert_eq!(readings[0].systolic.unit.as_deref(), Some("mmHg"));
        assert_eq!(readings[1].source, ReadingSource::Office);
        // unknown sites parse as Other rather than failing
        assert_eq!(
            readings[2].source,
            ReadingSource::Other("KIOSK".to_string())
        );
    }

    #[test]
    fn test_parse_ndjson() {
        let ndjson = concat!(
            r#"{"timestamp": 0, "systolic": {"value": 120}, "diastolic": {"value": 80}, "source": "HOME"}"#,
            "\n\n",
            r#"{"timestamp": 1000, "systolic": {"value": 118}, "diastolic": {"value": 78}, "source": "OFFICE"}"#,
            "\n",
        );

        let readings = ReadingAdapter::parse_ndjson(ndjson).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].systolic.value, 118.0);
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let ndjson = concat!(
            r#"{"timestamp": 0, "systolic": {"value": 120}, "diastolic": {"value": 80}, "source": "HOME"}"#,
            "\n",
            "not json\n",
        );

        let err = ReadingAdapter::parse_ndjson(ndjson).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ReadingAdapter::parse_array("not json").is_err());
    }

    #[test]
    fn test_validate_flags_unsorted_and_nonpositive() {
        let json = r#"[
            {"timestamp": 2000, "systolic": {"value": 120}, "diastolic": {"value": 80}, "source": "HOME"},
            {"timestamp": 1000, "systolic": {"value": 0}, "diastolic": {"value": 80}, "source": "HOME"}
        ]"#;
        let readings = ReadingAdapter::parse_array(json).unwrap();
        let issues = ReadingAdapter::validate(&readings);

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.index == 1));
    }

    #[test]
    fn test_validate_clean_set() {
        let readings = ReadingAdapter::parse_array(sample_array()).unwrap();
        assert!(ReadingAdapter::validate(&readings).is_empty());
    }
}
