use thiserror::Error;

/// Rejection of user-supplied input, raised before any store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("{field} is not a valid amount: '{value}'")]
    InvalidAmount { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    NonPositiveAmount { field: &'static str },
}

impl ValidationError {
    /// Name of the input field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::BlankField { field }
            | ValidationError::InvalidAmount { field, .. }
            | ValidationError::NonPositiveAmount { field } => field,
        }
    }
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_the_offending_input() {
        assert_eq!(ValidationError::BlankField { field: "name" }.field(), "name");
        let err = ValidationError::InvalidAmount {
            field: "amount",
            value: "abc".into(),
        };
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn require_non_blank_trims() {
        assert_eq!(require_non_blank("name", "  Ada Lovelace ").unwrap(), "Ada Lovelace");
    }

    #[test]
    fn require_non_blank_rejects_whitespace() {
        assert_eq!(
            require_non_blank("name", " \t "),
            Err(ValidationError::BlankField { field: "name" })
        );
    }

    #[test]
    fn display_mentions_field() {
        let err = ValidationError::NonPositiveAmount { field: "amount" };
        assert_eq!(err.to_string(), "amount must be greater than zero");
    }
}
