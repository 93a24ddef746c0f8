//! Field comparison between two devices.
//!
//! Equality rules:
//! - an absent value equals only another absent value (no zero coercion)
//! - a present empty string is a real value, distinct from absent
//! - numbers compare with IEEE equality, integers exactly
//! - list fields compare element by element, in sequence

use crate::{error::Result, field::FieldValue, order, Device, Error, Field};
use serde::{Deserialize, Serialize};

/// Which fields participate in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldSet {
    /// Scalar attributes and kind attributes
    #[default]
    Primary,
    /// Primary fields plus the discussion thread
    WithDiscussion,
}

impl FieldSet {
    pub fn fields(self) -> &'static [Field] {
        match self {
            FieldSet::Primary => &Field::COMPARABLE,
            FieldSet::WithDiscussion => &Field::ALL,
        }
    }
}

/// One differing field of an updated device pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub a: FieldValue,
    pub b: FieldValue,
}

impl FieldDiff {
    pub fn new(field: impl Into<String>, a: FieldValue, b: FieldValue) -> Self {
        Self {
            field: field.into(),
            a,
            b,
        }
    }

    /// Swap the A and B values.
    pub fn swapped(self) -> Self {
        Self {
            field: self.field,
            a: self.b,
            b: self.a,
        }
    }
}

/// Whether two devices agree on one field.
pub fn fields_equal(field: Field, a: &Device, b: &Device) -> bool {
    field.value(a) == field.value(b)
}

/// Read a field by name, including kind attributes.
pub fn field_value(device: &Device, name: &str) -> Result<FieldValue> {
    if let Some(field) = Field::from_name(name) {
        return Ok(field.value(device));
    }
    device
        .kind
        .attribute(name)
        .ok_or_else(|| Error::UnknownField(name.to_string()))
}

/// Every comparable field on which `a` and `b` differ, in canonical order.
///
/// Kind attributes follow the known fields: A's attributes in declaration
/// order, then attributes only B carries.
pub fn changed_fields(a: &Device, b: &Device, fields: FieldSet) -> Vec<FieldDiff> {
    let mut diffs: Vec<FieldDiff> = fields
        .fields()
        .iter()
        .filter(|field| !fields_equal(**field, a, b))
        .map(|field| FieldDiff::new(field.name(), field.value(a), field.value(b)))
        .collect();

    let a_attrs = a.kind.attributes();
    let b_attrs = b.kind.attributes();
    let mut names: Vec<&'static str> = a_attrs.iter().map(|(name, _)| *name).collect();
    for (name, _) in &b_attrs {
        if !names.contains(name) {
            names.push(*name);
        }
    }

    for name in names {
        let lookup = |attrs: &[(&'static str, FieldValue)]| {
            attrs
                .iter()
                .find(|(attr, _)| *attr == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };
        let va = lookup(&a_attrs);
        let vb = lookup(&b_attrs);
        if va != vb {
            diffs.push(FieldDiff::new(name, va, vb));
        }
    }

    order::sort_field_diffs(&mut diffs);
    diffs
}

/// A device pair has changed iff at least one comparable field differs.
pub fn has_changed(a: &Device, b: &Device, fields: FieldSet) -> bool {
    !changed_fields(a, b, fields).is_empty()
}
