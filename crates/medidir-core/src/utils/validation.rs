//! Input validation for configuration values and user input.

use crate::error::CliError;

/// Largest page size the directory backend accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> crate::Result<()> {
    if email.is_empty() {
        return Err(CliError::InvalidArguments("Email cannot be empty".to_string()).into());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(CliError::InvalidArguments(format!(
            "Invalid email '{}': Email must have username and domain parts",
            email
        ))
        .into());
    }

    if !parts[1].contains('.') {
        return Err(CliError::InvalidArguments(format!(
            "Invalid email '{}': Domain must contain dot",
            email
        ))
        .into());
    }

    Ok(())
}

pub fn validate_page_size(size: u32) -> crate::Result<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(CliError::InvalidArguments(format!(
            "Invalid page size {}: must be between 1 and {}",
            size, MAX_PAGE_SIZE
        ))
        .into());
    }
    Ok(())
}
