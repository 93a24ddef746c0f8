//! Comparable device fields.
//!
//! Every attribute that takes part in equality and diffing is listed in
//! [`Field`], together with its accessor. The declaration order of the enum
//! is the canonical presentation order of field differences. Identity
//! attributes (`id`, `fc`, `fg`) are deliberately not fields.

use crate::{Device, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    List,
}

/// A comparable device field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TcPartNo,
    Stand,
    State,
    Comments,
    NomLocX,
    NomLocY,
    NomLocZ,
    NomDimX,
    NomDimY,
    NomDimZ,
    NomAngX,
    NomAngY,
    NomAngZ,
    RayTrace,
    /// Discussion thread, compared by comment text sequence. Only compared
    /// when explicitly requested.
    Discussion,
}

impl Field {
    /// Fields compared by default, in canonical order.
    pub const COMPARABLE: [Field; 14] = [
        Field::TcPartNo,
        Field::Stand,
        Field::State,
        Field::Comments,
        Field::NomLocX,
        Field::NomLocY,
        Field::NomLocZ,
        Field::NomDimX,
        Field::NomDimY,
        Field::NomDimZ,
        Field::NomAngX,
        Field::NomAngY,
        Field::NomAngZ,
        Field::RayTrace,
    ];

    /// Every field, in canonical order.
    pub const ALL: [Field; 15] = [
        Field::TcPartNo,
        Field::Stand,
        Field::State,
        Field::Comments,
        Field::NomLocX,
        Field::NomLocY,
        Field::NomLocZ,
        Field::NomDimX,
        Field::NomDimY,
        Field::NomDimZ,
        Field::NomAngX,
        Field::NomAngY,
        Field::NomAngZ,
        Field::RayTrace,
        Field::Discussion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::TcPartNo => "tc_part_no",
            Field::Stand => "stand",
            Field::State => "state",
            Field::Comments => "comments",
            Field::NomLocX => "nom_loc_x",
            Field::NomLocY => "nom_loc_y",
            Field::NomLocZ => "nom_loc_z",
            Field::NomDimX => "nom_dim_x",
            Field::NomDimY => "nom_dim_y",
            Field::NomDimZ => "nom_dim_z",
            Field::NomAngX => "nom_ang_x",
            Field::NomAngY => "nom_ang_y",
            Field::NomAngZ => "nom_ang_z",
            Field::RayTrace => "ray_trace",
            Field::Discussion => "discussion",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Position in the canonical order.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::TcPartNo | Field::Stand | Field::State | Field::Comments => FieldKind::Text,
            Field::RayTrace => FieldKind::Integer,
            Field::Discussion => FieldKind::List,
            _ => FieldKind::Number,
        }
    }

    /// Read this field from a device.
    pub fn value(self, device: &Device) -> FieldValue {
        match self {
            Field::TcPartNo => FieldValue::text(device.tc_part_no.as_ref()),
            Field::Stand => FieldValue::text(device.stand.as_ref()),
            Field::State => FieldValue::Text(device.state.clone()),
            Field::Comments => FieldValue::text(device.comments.as_ref()),
            Field::NomLocX => FieldValue::number(device.nom_loc_x),
            Field::NomLocY => FieldValue::number(device.nom_loc_y),
            Field::NomLocZ => FieldValue::number(device.nom_loc_z),
            Field::NomDimX => FieldValue::number(device.nom_dim_x),
            Field::NomDimY => FieldValue::number(device.nom_dim_y),
            Field::NomDimZ => FieldValue::number(device.nom_dim_z),
            Field::NomAngX => FieldValue::number(device.nom_ang_x),
            Field::NomAngY => FieldValue::number(device.nom_ang_y),
            Field::NomAngZ => FieldValue::number(device.nom_ang_z),
            Field::RayTrace => FieldValue::integer(device.ray_trace),
            Field::Discussion => FieldValue::List(
                device
                    .discussion
                    .iter()
                    .map(|comment| comment.text.clone())
                    .collect(),
            ),
        }
    }

    /// Overwrite this field on `to` with the value held by `from`.
    pub fn copy(self, from: &Device, to: &mut Device) {
        match self {
            Field::TcPartNo => to.tc_part_no = from.tc_part_no.clone(),
            Field::Stand => to.stand = from.stand.clone(),
            Field::State => to.state = from.state.clone(),
            Field::Comments => to.comments = from.comments.clone(),
            Field::NomLocX => to.nom_loc_x = from.nom_loc_x,
            Field::NomLocY => to.nom_loc_y = from.nom_loc_y,
            Field::NomLocZ => to.nom_loc_z = from.nom_loc_z,
            Field::NomDimX => to.nom_dim_x = from.nom_dim_x,
            Field::NomDimY => to.nom_dim_y = from.nom_dim_y,
            Field::NomDimZ => to.nom_dim_z = from.nom_dim_z,
            Field::NomAngX => to.nom_ang_x = from.nom_ang_x,
            Field::NomAngY => to.nom_ang_y = from.nom_ang_y,
            Field::NomAngZ => to.nom_ang_z = from.nom_ang_z,
            Field::RayTrace => to.ray_trace = from.ray_trace,
            Field::Discussion => to.discussion = from.discussion.clone(),
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of one field on one device.
///
/// `Absent` is distinct from every present value, including zero and the
/// empty string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: Option<&String>) -> Self {
        value.map_or(FieldValue::Absent, |v| FieldValue::Text(v.clone()))
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Number)
    }

    pub fn integer(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Integer)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}
