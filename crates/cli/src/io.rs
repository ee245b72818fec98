//! JSON input and output for the CLI.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use u_takeoff_d2::{DrawingEntity, TakeoffConfig};

/// Accepted shapes of an input drawing file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DrawingFile {
    Document { entities: Vec<DrawingEntity> },
    Entities(Vec<DrawingEntity>),
}

/// Reads drawing entities from a JSON file.
///
/// The file is either an array of entities or an object with an
/// `entities` array.
pub fn load_entities(path: &Path) -> Result<Vec<DrawingEntity>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read drawing {}", path.display()))?;
    let file: DrawingFile = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid drawing entity file", path.display()))?;
    Ok(match file {
        DrawingFile::Document { entities } | DrawingFile::Entities(entities) => entities,
    })
}

/// Reads a configuration file; missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<TakeoffConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: TakeoffConfig = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid takeoff config", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

/// Writes pretty JSON to `path`, or to stdout if `path` is `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}
