pub mod appt;
pub mod cal;
pub mod config;
pub mod show;
pub mod todo;

use anyhow::{Result, bail};

/// Join command-line words into entry text, rejecting blank input.
pub fn entry_text(words: &[String]) -> Result<String> {
    let text = words.join(" ");
    let text = text.trim();

    if text.is_empty() {
        bail!("Text cannot be empty");
    }

    Ok(text.to_string())
}

/// Convert a 1-based number shown in listings to a store index.
/// `0` maps to `None` and is reported like any other stale number.
pub fn to_index(number: usize) -> Option<usize> {
    number.checked_sub(1)
}
