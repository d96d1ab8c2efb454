//! Error types for fact building and outline validation.
//!
//! Only structurally unusable input is an error. Recoverable data problems
//! (unknown names, out-of-range ids, provider disagreements) are reported
//! as [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.

use thiserror::Error;

/// Errors from building a fact sheet out of a provider payload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactsError {
    /// The payload carries neither an ascendant sign nor an ascendant longitude.
    #[error("chart payload has no ascendant sign or longitude")]
    MissingAscendant,
    /// The payload is not valid JSON for the expected shape.
    #[error("malformed chart payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from validating an outline: structural problems only.
///
/// A well-formed outline that disagrees with the chart is not an error; it
/// yields an invalid [`ValidationResult`](crate::validate::ValidationResult).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutlineError {
    /// An outline entry lacks a field needed to compare it at all.
    #[error("outline {entry} is missing required field `{field}`")]
    MissingField { entry: String, field: &'static str },
    /// The outline is not valid JSON for the expected shape.
    #[error("malformed outline: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutlineError {
    pub(crate) fn missing(entry: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            entry: entry.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            FactsError::MissingAscendant.to_string(),
            "chart payload has no ascendant sign or longitude"
        );
        assert_eq!(
            OutlineError::missing("planets[2]", "planet").to_string(),
            "outline planets[2] is missing required field `planet`"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let facts: FactsError = err.into();
        assert!(facts.to_string().starts_with("malformed chart payload"));
    }
}
