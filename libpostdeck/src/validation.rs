//! Draft validation
//!
//! Checks a draft post against the gateway's input constraints before
//! any provider call is made: non-empty after trimming, and at most
//! [`CHARACTER_LIMIT`] UTF-16 code units. Code units (rather than chars
//! or bytes) match how the dashboard's character counter measures text.

use crate::error::{PostdeckError, Result};

/// Maximum draft length in UTF-16 code units
pub const CHARACTER_LIMIT: usize = 280;

/// Count the UTF-16 code units in a draft
pub fn code_unit_count(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Validate a draft post
///
/// # Errors
///
/// Returns `PostdeckError::InvalidInput` with a user-visible message if
/// the text is empty after trimming or exceeds the length cap.
pub fn validate_draft(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(PostdeckError::InvalidInput(
            "Content cannot be empty or whitespace-only".to_string(),
        ));
    }

    let units = code_unit_count(text);
    if units > CHARACTER_LIMIT {
        return Err(PostdeckError::InvalidInput(format!(
            "Content length ({} characters) exceeds the {} character limit",
            units, CHARACTER_LIMIT
        )));
    }

    Ok(())
}
