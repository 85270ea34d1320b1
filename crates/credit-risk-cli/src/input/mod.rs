pub mod config;
pub mod directory;
pub mod file;

use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Structured command input: the `--input` file when given, otherwise JSON
/// piped on stdin. `None` means the caller should fall back to flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match read_stdin()? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Piped stdin contents, or `None` for an interactive terminal or empty pipe.
fn read_stdin() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}
