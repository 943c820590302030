//! Common validation helpers for use cases.

/// Validation error type.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },

    #[error("{field_name} is invalid: {reason}")]
    Invalid {
        field_name: &'static str,
        reason: String,
    },

    #[error("Column '{column}' cannot be used for {usage} in view '{view}'")]
    ColumnNotAllowed {
        view: &'static str,
        column: String,
        usage: &'static str,
    },
}

/// Validate a string is non-empty after trimming.
pub fn require_non_empty(value: &str, field_name: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    Ok(())
}

/// Validate that `column` is one of the columns a view exposes for `usage`.
pub fn require_listed_column(
    view: &'static str,
    column: &str,
    allowed: &[&'static str],
    usage: &'static str,
) -> Result<(), ValidationError> {
    if allowed.iter().any(|c| c.eq_ignore_ascii_case(column)) {
        return Ok(());
    }
    Err(ValidationError::ColumnNotAllowed {
        view,
        column: column.to_string(),
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_empty() {
        assert!(matches!(
            require_non_empty("  ", "Path"),
            Err(ValidationError::Empty { field_name: "Path" })
        ));
        assert!(require_non_empty("maps", "Path").is_ok());
    }

    #[test]
    fn listed_columns_match_case_insensitively() {
        assert!(require_listed_column("leader", "Name", &["name"], "sorting").is_ok());
        let err = require_listed_column("leader", "flaws", &["name"], "sorting")
            .expect_err("not listed");
        assert_eq!(
            err.to_string(),
            "Column 'flaws' cannot be used for sorting in view 'leader'"
        );
    }
}
