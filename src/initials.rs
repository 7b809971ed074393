//! Avatar fallback label derived from a display name.

use crate::error::{ChatError, Result};

/// Derive a one or two letter uppercase label from a display name.
///
/// A single word yields its first letter; several words yield the first
/// letter of the first and of the last word. Any run of whitespace
/// separates words, and surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use bubblechat::initials;
///
/// assert_eq!(initials("John").unwrap(), "J");
/// assert_eq!(initials("  john   smith doe ").unwrap(), "JD");
/// assert!(initials("   ").is_err());
/// ```
pub fn initials(name: &str) -> Result<String> {
    let mut words = name.split_whitespace();
    let first = words
        .next()
        .ok_or_else(|| ChatError::InvalidInput("display name is empty".to_string()))?;

    let mut label = leading_upper(first);
    if let Some(last) = words.last() {
        label.push_str(&leading_upper(last));
    }
    Ok(label)
}

fn leading_upper(word: &str) -> String {
    word.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
