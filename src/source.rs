//! Reading configuration documents.
use std::path::Path;

use serde_json::Value;

use crate::error::Error;

pub fn parse_str(src: &str) -> Result<Value, Error> {
    Ok(serde_json::from_str(src)?)
}

pub fn parse_slice(bytes: &[u8]) -> Result<Value, Error> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads and parses the JSON file at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Value, Error> {
    let path = path.as_ref();
    log::debug!("reading config document {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_str(&contents)
}
