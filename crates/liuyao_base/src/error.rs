//! Error types for hexagram computation.

use thiserror::Error;

/// Errors from hexagram construction, rule-set lookup and table resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LiuyaoError {
    /// Caller-supplied input is malformed (wrong line count, bad coin value,
    /// mismatched stem/branch polarity). Raised before any computation.
    #[error("invalid input: {0}")]
    InputValidation(String),
    /// The requested rule set is not registered.
    #[error("rule set not found: {0}")]
    RuleSetNotFound(String),
    /// A closed table did not contain an entry it must contain.
    /// Indicates a defect in the shipped tables, never a runtime condition.
    #[error("internal table lookup failed: {0}")]
    InternalLookup(String),
    /// A rule-set document failed to parse or validate.
    #[error("rule set config: {0}")]
    RuleSetConfig(String),
}

impl LiuyaoError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InputValidation(msg.into())
    }

    pub(crate) fn lookup(msg: impl Into<String>) -> Self {
        Self::InternalLookup(msg.into())
    }
}

impl From<serde_json::Error> for LiuyaoError {
    fn from(e: serde_json::Error) -> Self {
        Self::RuleSetConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LiuyaoError::RuleSetNotFound("x".into()).to_string(),
            "rule set not found: x"
        );
        assert_eq!(
            LiuyaoError::input("need 6 lines").to_string(),
            "invalid input: need 6 lines"
        );
    }

    #[test]
    fn json_error_converts_to_config() {
        let err = serde_json::from_str::<u8>("not json").unwrap_err();
        assert!(matches!(LiuyaoError::from(err), LiuyaoError::RuleSetConfig(_)));
    }
}
