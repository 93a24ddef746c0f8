//! Reconciliation of two device collections.
//!
//! This is the core of the engine. Given a collection A and a collection B,
//! every device is classified by its `(fc, fg)` key into exactly one bucket
//! of a [`Diff`].
//!
//! # Algorithm
//!
//! 1. Group A by key (single pass)
//! 2. Group B by key (single pass)
//! 3. Classify each key: A only is new, B only is missing, both sides are
//!    updated when any comparable field differs and identical otherwise
//! 4. Sort every bucket so the output does not depend on input order

use crate::{
    compare::{self, FieldDiff, FieldSet},
    error::{Result, Side},
    order, Device, Error, Project, ProjectId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when one collection holds the same `(fc, fg)` twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateKey`] (default)
    #[default]
    Reject,
    /// Keep the device seen last in that collection
    LastWins,
}

/// Options for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOptions {
    pub duplicates: DuplicatePolicy,
    pub fields: FieldSet,
}

impl ReconcileOptions {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }
}

/// A device present on both sides with at least one differing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedPair {
    pub a: Device,
    pub b: Device,
    /// Differing fields in canonical order, never empty
    pub changes: Vec<FieldDiff>,
}

impl UpdatedPair {
    /// Whether `field` is among the differing fields.
    pub fn differs_in(&self, field: &str) -> bool {
        self.changes.iter().any(|change| change.field == field)
    }
}

/// Result of reconciling collection A against collection B.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    /// Devices only in A
    pub new: Vec<Device>,
    /// Devices only in B
    pub missing: Vec<Device>,
    /// Devices in both with differing fields
    pub updated: Vec<UpdatedPair>,
    /// Devices in both with all comparable fields equal (A side)
    pub identical: Vec<Device>,
}

/// Bucket sizes of a [`Diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub new: usize,
    pub missing: usize,
    pub updated: usize,
    pub identical: usize,
}

impl Diff {
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            new: self.new.len(),
            missing: self.missing.len(),
            updated: self.updated.len(),
            identical: self.identical.len(),
        }
    }

    /// Number of distinct keys classified.
    pub fn len(&self) -> usize {
        self.new.len() + self.missing.len() + self.updated.len() + self.identical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether anything other than identical devices was found.
    pub fn has_changes(&self) -> bool {
        !(self.new.is_empty() && self.missing.is_empty() && self.updated.is_empty())
    }

    /// The diff as seen from the other side: new and missing trade places
    /// and every updated pair is flipped.
    ///
    /// `identical` keeps the devices it already holds.
    pub fn swap(self) -> Diff {
        let mut updated: Vec<UpdatedPair> = self
            .updated
            .into_iter()
            .map(|pair| UpdatedPair {
                a: pair.b,
                b: pair.a,
                changes: pair.changes.into_iter().map(FieldDiff::swapped).collect(),
            })
            .collect();
        order::sort_updated(&mut updated);
        Diff {
            new: self.missing,
            missing: self.new,
            updated,
            identical: self.identical,
        }
    }
}

#[derive(Debug, Default)]
struct Slot<'d> {
    a: Option<&'d Device>,
    b: Option<&'d Device>,
}

impl<'d> Slot<'d> {
    fn side_mut(&mut self, side: Side) -> &mut Option<&'d Device> {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

/// Classifies two device collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReconcileOptions {
        self.options
    }

    /// Reconcile collection `a` against collection `b`.
    ///
    /// Inputs are only read. The only possible error is a duplicate key under
    /// [`DuplicatePolicy::Reject`].
    pub fn reconcile(&self, a: &[Device], b: &[Device]) -> Result<Diff> {
        let mut slots: HashMap<(&str, &str), Slot<'_>> =
            HashMap::with_capacity(a.len().max(b.len()));

        self.group(&mut slots, a, Side::A)?;
        self.group(&mut slots, b, Side::B)?;

        let mut diff = Diff::default();
        for slot in slots.into_values() {
            match (slot.a, slot.b) {
                (Some(device), None) => diff.new.push(device.clone()),
                (None, Some(device)) => diff.missing.push(device.clone()),
                (Some(da), Some(db)) => {
                    let changes = compare::changed_fields(da, db, self.options.fields);
                    if changes.is_empty() {
                        diff.identical.push(da.clone());
                    } else {
                        diff.updated.push(UpdatedPair {
                            a: da.clone(),
                            b: db.clone(),
                            changes,
                        });
                    }
                }
                (None, None) => {}
            }
        }

        order::sort_devices(&mut diff.new);
        order::sort_devices(&mut diff.missing);
        order::sort_devices(&mut diff.identical);
        order::sort_updated(&mut diff.updated);

        let summary = diff.summary();
        tracing::debug!(
            new = summary.new,
            missing = summary.missing,
            updated = summary.updated,
            identical = summary.identical,
            "reconciled {} devices against {}",
            a.len(),
            b.len()
        );

        Ok(diff)
    }

    fn group<'d>(
        &self,
        slots: &mut HashMap<(&'d str, &'d str), Slot<'d>>,
        devices: &'d [Device],
        side: Side,
    ) -> Result<()> {
        for device in devices {
            let slot = slots
                .entry((device.fc.as_str(), device.fg.as_str()))
                .or_default()
                .side_mut(side);
            if slot.is_some() {
                match self.options.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateKey {
                            side,
                            fc: device.fc.clone(),
                            fg: device.fg.clone(),
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(
                            "duplicate device ({}, {}) in collection {}, keeping the last one",
                            device.fc,
                            device.fg,
                            side
                        );
                    }
                }
            }
            *slot = Some(device);
        }
        Ok(())
    }
}

/// Reconcile with default options.
pub fn reconcile(a: &[Device], b: &[Device]) -> Result<Diff> {
    Reconciler::default().reconcile(a, b)
}

/// A reconciliation between two projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComparison {
    pub project_a: ProjectId,
    pub project_b: ProjectId,
    /// Both operands are the same project; presentation may hide the
    /// new/missing headings
    pub same_project: bool,
    pub diff: Diff,
}

impl Project {
    /// Reconcile this project's devices (A) against `other`'s (B).
    pub fn compare(&self, other: &Project, options: ReconcileOptions) -> Result<ProjectComparison> {
        let diff = Reconciler::new(options).reconcile(&self.devices, &other.devices)?;
        Ok(ProjectComparison {
            project_a: self.id.clone(),
            project_b: other.id.clone(),
            same_project: self.id == other.id,
            diff,
        })
    }
}
