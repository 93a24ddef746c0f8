//! Loading device collections from disk.
//!
//! A collection file holds either a project object or a bare array of
//! devices. Both operands of a comparison are read concurrently; if either
//! read fails, nothing is reconciled.

use crate::error::{AppError, Result};
use fcfg_engine::{Device, Project};
use std::path::Path;

/// Parse a collection file's contents.
///
/// Bare device arrays become a project whose id and name are `label`.
pub fn parse_collection(label: &str, text: &str) -> Result<Project> {
    let json_error = |source| AppError::Json {
        path: label.to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(text).map_err(json_error)?;
    if value.is_array() {
        let devices: Vec<Device> = serde_json::from_value(value).map_err(json_error)?;
        Ok(Project::new(label, label).with_devices(devices))
    } else {
        serde_json::from_value(value).map_err(json_error)
    }
}

/// Read one collection file.
pub async fn load_collection(path: &Path) -> Result<Project> {
    let label = path.display().to_string();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Io {
            path: label.clone(),
            source,
        })?;

    let project = parse_collection(&label, &text)?;
    tracing::debug!(
        "loaded {} devices for project {} from {}",
        project.devices.len(),
        project.id,
        label
    );
    Ok(project)
}

/// Read both operands of a comparison concurrently.
pub async fn load_pair(a: &Path, b: &Path) -> Result<(Project, Project)> {
    tokio::try_join!(load_collection(a), load_collection(b))
}
