//! Field-level validation rules

use crate::types::*;

/// Validate an account or cost-center code
pub fn validate_code(code: &str) -> LedgerResult<()> {
    if code.trim().is_empty() {
        return Err(LedgerError::Validation("code cannot be empty".to_string()));
    }

    if code.len() > 50 {
        return Err(LedgerError::Validation(
            "code cannot exceed 50 characters".to_string(),
        ));
    }

    // alphanumeric plus dashes, dots, and underscores
    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(LedgerError::Validation(
            "code can only contain alphanumeric characters, dashes, dots, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate an account or cost-center name
pub fn validate_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation("name cannot be empty".to_string()));
    }

    if name.len() > 100 {
        return Err(LedgerError::Validation(
            "name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a journal entry description
pub fn validate_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "entry description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(LedgerError::Validation(
            "entry description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}
