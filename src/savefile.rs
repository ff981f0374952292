// Agent save files: the registration response kept on disk, and the bearer
// token read back out of it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ClientError, Result};

/// Extracts `data.token` from a save file / registration envelope.
///
/// Trailing NUL padding is ignored. Anything other than a non-empty string at
/// `data.token` is a `Decode` error.
pub fn decode_token(bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let envelope: Value = serde_json::from_slice(&bytes[..end])
        .map_err(|e| ClientError::Decode(format!("save file is not valid JSON: {}", e)))?;

    let data = envelope
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| ClientError::Decode("save file has no 'data' object".to_string()))?;

    match data.get("token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
        Some(Value::String(_)) => Err(ClientError::Decode("token in save file is empty".to_string())),
        Some(other) => Err(ClientError::Decode(format!(
            "token in save file is not a string: {}",
            other
        ))),
        None => Err(ClientError::Decode("save file has no 'data.token' field".to_string())),
    }
}

/// Finds a save file: `name` as given if it exists, otherwise `save_dir/name`.
pub fn resolve_save_path(name: &Path, save_dir: &Path) -> Result<PathBuf> {
    if name.exists() {
        return Ok(name.to_path_buf());
    }

    let fallback = save_dir.join(name);
    if fallback.exists() {
        return Ok(fallback);
    }

    Err(ClientError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!(
            "Unable to find save file: tried {} and {}",
            name.display(),
            fallback.display()
        ),
    )))
}

/// Reads a save file and decodes its token.
pub fn load_token(path: &Path) -> Result<String> {
    let contents = fs::read(path).map_err(|e| {
        ClientError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;
    decode_token(&contents)
}

/// Path a newly registered agent's save file is written to.
pub fn registration_path(save_dir: &Path, agent_symbol: &str) -> PathBuf {
    save_dir.join(format!("{}.json", agent_symbol))
}

/// Stores a registration response verbatim, newline-terminated.
pub fn write_registration(save_dir: &Path, agent_symbol: &str, body: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(save_dir)?;

    let path = registration_path(save_dir, agent_symbol);
    let mut contents = Vec::with_capacity(body.len() + 1);
    contents.extend_from_slice(body);
    if contents.last() != Some(&b'\n') {
        contents.push(b'\n');
    }
    fs::write(&path, contents)?;
    Ok(path)
}
