use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal outcome of one field comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    MatchedExactly,
    MatchedWithTolerance,
    MatchedContentOnly,
    MatchedMostly,
    DoesNotMatch,
    TypeError,
    MissingRequiredField,
    NotApplicable,
}

/// Visual grouping of statuses for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Pass,
    Review,
    Fail,
    Invalid,
    Neutral,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 8] = [
        ValidationStatus::MatchedExactly,
        ValidationStatus::MatchedWithTolerance,
        ValidationStatus::MatchedContentOnly,
        ValidationStatus::MatchedMostly,
        ValidationStatus::DoesNotMatch,
        ValidationStatus::TypeError,
        ValidationStatus::MissingRequiredField,
        ValidationStatus::NotApplicable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::MatchedExactly => "MATCHED_EXACTLY",
            ValidationStatus::MatchedWithTolerance => "MATCHED_WITH_TOLERANCE",
            ValidationStatus::MatchedContentOnly => "MATCHED_CONTENT_ONLY",
            ValidationStatus::MatchedMostly => "MATCHED_MOSTLY",
            ValidationStatus::DoesNotMatch => "DOES_NOT_MATCH",
            ValidationStatus::TypeError => "TYPE_ERROR",
            ValidationStatus::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ValidationStatus::NotApplicable => "NOT_APPLICABLE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValidationStatus::MatchedExactly => "Matched Exactly",
            ValidationStatus::MatchedWithTolerance => "Matched (In Tolerance)",
            ValidationStatus::MatchedContentOnly => "Matched Content",
            ValidationStatus::MatchedMostly => "Mostly Matched",
            ValidationStatus::DoesNotMatch => "Mismatch",
            ValidationStatus::TypeError => "Type Error",
            ValidationStatus::MissingRequiredField => "Missing Required Field",
            ValidationStatus::NotApplicable => "Not Applicable",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            ValidationStatus::MatchedExactly
            | ValidationStatus::MatchedWithTolerance
            | ValidationStatus::MatchedContentOnly => StatusTone::Pass,
            ValidationStatus::MatchedMostly => StatusTone::Review,
            ValidationStatus::DoesNotMatch | ValidationStatus::MissingRequiredField => {
                StatusTone::Fail
            }
            ValidationStatus::TypeError => StatusTone::Invalid,
            ValidationStatus::NotApplicable => StatusTone::Neutral,
        }
    }

    /// Statuses that need a person to look at the documents.
    pub fn is_issue(&self) -> bool {
        matches!(self.tone(), StatusTone::Fail | StatusTone::Invalid)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized validation status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ValidationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ValidationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Status, score and explanation produced by a single validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub status: ValidationStatus,
    pub score: Option<u8>,
    pub notes: Option<String>,
}

impl FieldVerdict {
    pub fn new(status: ValidationStatus, score: u8) -> Self {
        Self {
            status,
            score: Some(score),
            notes: None,
        }
    }

    pub fn unscored(status: ValidationStatus, notes: impl Into<String>) -> Self {
        Self {
            status,
            score: None,
            notes: Some(notes.into()),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.is_empty() { None } else { Some(notes) };
        self
    }
}

/// One row of a validation report; raw values are kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub status: ValidationStatus,
    pub score: Option<u8>,
    pub notes: Option<String>,
    pub source_value: FieldValue,
    pub target_value: FieldValue,
}

impl FieldResult {
    pub fn from_verdict(verdict: FieldVerdict, source: &FieldValue, target: &FieldValue) -> Self {
        Self {
            status: verdict.status,
            score: verdict.score,
            notes: verdict.notes,
            source_value: source.clone(),
            target_value: target.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_round_trip_through_wire_strings() {
        for status in ValidationStatus::ALL {
            let parsed: ValidationStatus = status.as_str().parse().expect("known status parses");
            assert_eq!(parsed, status);

            let json = serde_json::to_string(&status).expect("status serializes");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn unknown_status_is_an_error() {
        let err = "MATCHED_SORT_OF"
            .parse::<ValidationStatus>()
            .expect_err("unknown status rejected");
        assert_eq!(err, UnknownStatus("MATCHED_SORT_OF".to_string()));
        assert!(serde_json::from_str::<ValidationStatus>("\"matched_exactly\"").is_err());
    }

    #[test]
    fn tones_group_statuses_for_display() {
        assert_eq!(ValidationStatus::MatchedContentOnly.tone(), StatusTone::Pass);
        assert_eq!(ValidationStatus::MatchedMostly.tone(), StatusTone::Review);
        assert_eq!(ValidationStatus::MissingRequiredField.tone(), StatusTone::Fail);
        assert_eq!(ValidationStatus::TypeError.tone(), StatusTone::Invalid);
        assert_eq!(ValidationStatus::NotApplicable.tone(), StatusTone::Neutral);
        assert!(ValidationStatus::TypeError.is_issue());
        assert!(!ValidationStatus::MatchedMostly.is_issue());
    }
}
