// Validation utilities
// Author: Gabriel Demetrios Lafis

/// Validate that a string is not blank
pub fn validate_not_empty(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{}' cannot be empty", name))
    } else {
        Ok(())
    }
}

/// Validate that a string is an http or https URL
pub fn validate_base_url(value: &str, name: &str) -> Result<(), String> {
    validate_not_empty(value, name)?;

    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .ok_or_else(|| format!("'{}' must start with http:// or https://", name))?;

    if rest.trim_matches('/').is_empty() {
        return Err(format!("'{}' has no host", name));
    }

    Ok(())
}

/// Validate that a numeric value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}",
            name, min, max
        ))
    } else {
        Ok(())
    }
}
