//! Unified error types for the domain layer
//!
//! Value objects report parse and validation failures through `DomainError`
//! so adapters never have to fall back to bare strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty identifiers)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for values that parse but break an invariant.
    ///
    /// # Example
    /// ```ignore
    /// if code.trim().is_empty() {
    ///     return Err(DomainError::validation("Referral code cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DomainError::parse("bad version").to_string(),
            "Parse error: bad version"
        );
        assert_eq!(
            DomainError::validation("empty").to_string(),
            "Validation failed: empty"
        );
    }
}
