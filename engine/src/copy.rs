//! Selective copying of field values between projects.
//!
//! An operator picks some of the differing fields of an [`UpdatedPair`];
//! the selection becomes a [`CopyRequest`] that the write side carries out
//! with [`apply_copy`].

use crate::{
    error::Result, reconcile::UpdatedPair, Device, DeviceKey, Error, Field, ProjectId,
};
use serde::{Deserialize, Serialize};

/// A validated request to copy selected field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    pub source_project: ProjectId,
    pub destination_project: ProjectId,
    pub key: DeviceKey,
    /// Selected field names, in diff order
    pub fields: Vec<String>,
}

impl CopyRequest {
    /// Build a request from an operator's selection over an updated pair.
    ///
    /// Every selected name must be a comparable field that differs in
    /// `pair`. Kind attributes of a pair whose kinds differ can only be
    /// selected together with `kind`. The resulting field list follows the
    /// pair's diff order and contains no duplicates.
    pub fn from_selection(
        pair: &UpdatedPair,
        source_project: impl Into<ProjectId>,
        destination_project: impl Into<ProjectId>,
        selection: &[&str],
    ) -> Result<Self> {
        if selection.is_empty() {
            return Err(Error::EmptySelection);
        }

        let copies_kind = selection.contains(&"kind");
        let same_kind = pair.a.kind.name() == pair.b.kind.name();
        for name in selection {
            let is_field = Field::from_name(name).is_some();
            let known = is_field
                || pair.a.kind.attribute(name).is_some()
                || pair.b.kind.attribute(name).is_some();
            if !known {
                return Err(Error::UnknownField(name.to_string()));
            }
            if !pair.differs_in(name) {
                return Err(Error::FieldNotDiffering(name.to_string()));
            }
            if !is_field && *name != "kind" && !same_kind && !copies_kind {
                return Err(Error::KindMismatch(name.to_string()));
            }
        }

        let fields = pair
            .changes
            .iter()
            .filter(|change| selection.contains(&change.field.as_str()))
            .map(|change| change.field.clone())
            .collect();

        Ok(Self {
            source_project: source_project.into(),
            destination_project: destination_project.into(),
            key: pair.a.key(),
            fields,
        })
    }
}

/// Produce a new destination device with the named fields taken from
/// `source`.
///
/// Copying `kind` takes the source's whole kind payload, so any kind
/// attributes selected alongside it are already covered.
pub fn apply_copy(source: &Device, destination: &Device, fields: &[String]) -> Result<Device> {
    if source.fc != destination.fc || source.fg != destination.fg {
        return Err(Error::KeyMismatch {
            source_fc: source.fc.clone(),
            source_fg: source.fg.clone(),
            destination_fc: destination.fc.clone(),
            destination_fg: destination.fg.clone(),
        });
    }

    let mut result = destination.clone();
    let copies_kind = fields.iter().any(|name| name == "kind");
    if copies_kind {
        result.kind.copy_attribute("kind", &source.kind)?;
    }

    for name in fields.iter().filter(|name| *name != "kind") {
        match Field::from_name(name) {
            Some(field) => field.copy(source, &mut result),
            None if copies_kind => {}
            None => result.kind.copy_attribute(name, &source.kind)?,
        }
    }

    tracing::debug!(
        "copied {} field(s) onto {}",
        fields.len(),
        destination.key()
    );
    Ok(result)
}
