//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate maximum length (in characters).
pub fn validate_max_length(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must be at most {} characters", field_name, max))
    } else {
        Ok(())
    }
}

/// Validate an account or contract address: `0x` followed by 40 hex digits.
pub fn validate_address(address: &str) -> Result<(), String> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| "Address must start with 0x".to_string())?;

    if digits.len() != 40 {
        return Err(format!("Address must have 40 hex digits, got {}", digits.len()));
    }

    hex::decode(digits)
        .map(|_| ())
        .map_err(|_| "Address contains non-hex characters".to_string())
}
