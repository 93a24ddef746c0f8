//! Device and project records.

use crate::{
    error::Result, field::FieldValue, normalize, DeviceId, Error, Fc, Fg, ProjectId, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity of a device within a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceKey {
    pub fc: Fc,
    pub fg: Fg,
}

impl DeviceKey {
    pub fn new(fc: impl Into<Fc>, fg: impl Into<Fg>) -> Self {
        Self {
            fc: fc.into(),
            fg: fg.into(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.fc, self.fg)
    }
}

/// Lifecycle state vocabulary.
///
/// Variants are declared in lifecycle order, so the derived `Ord` follows
/// the progression from `Conceptual` to `Removed`. `Unknown` sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceState {
    Conceptual,
    Planned,
    ReadyForInstallation,
    Installed,
    Commissioned,
    Operational,
    NonOperational,
    DeCommissioned,
    Removed,
    Unknown,
}

impl DeviceState {
    pub const ALL: [DeviceState; 10] = [
        DeviceState::Conceptual,
        DeviceState::Planned,
        DeviceState::ReadyForInstallation,
        DeviceState::Installed,
        DeviceState::Commissioned,
        DeviceState::Operational,
        DeviceState::NonOperational,
        DeviceState::DeCommissioned,
        DeviceState::Removed,
        DeviceState::Unknown,
    ];

    /// Human readable label, as stored on devices.
    pub fn label(self) -> &'static str {
        match self {
            DeviceState::Conceptual => "Conceptual",
            DeviceState::Planned => "Planned",
            DeviceState::ReadyForInstallation => "Ready For Installation",
            DeviceState::Installed => "Installed",
            DeviceState::Commissioned => "Commissioned",
            DeviceState::Operational => "Operational",
            DeviceState::NonOperational => "Non-operational",
            DeviceState::DeCommissioned => "De-commissioned",
            DeviceState::Removed => "Removed",
            DeviceState::Unknown => "Unknown",
        }
    }

    /// Interpret a stored state string. Never fails: anything outside the
    /// vocabulary is `Unknown`. Case, spaces, hyphens and underscores are
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let folded: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|state| {
                state
                    .label()
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '-'))
                    .flat_map(char::to_lowercase)
                    .eq(folded.chars())
            })
            .unwrap_or(DeviceState::Unknown)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a device's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    /// Milliseconds since epoch
    pub created: Timestamp,
    pub text: String,
}

impl Comment {
    pub fn new(author: impl Into<String>, created: Timestamp, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            created,
            text: text.into(),
        }
    }
}

/// Kind-specific attributes of a device.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceKind {
    #[default]
    Generic,
    Mirror {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coating: Option<String>,
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        radius_of_curvature: Option<f64>,
    },
    KbMirror {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coating: Option<String>,
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        focal_distance: Option<f64>,
    },
    Grating {
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        groove_density: Option<f64>,
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        blaze_angle: Option<f64>,
    },
    Aperture {
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        width: Option<f64>,
        #[serde(
            default,
            deserialize_with = "normalize::optional_number",
            skip_serializing_if = "Option::is_none"
        )]
        height: Option<f64>,
    },
}

impl DeviceKind {
    /// Name of the variant, as serialized in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            DeviceKind::Generic => "generic",
            DeviceKind::Mirror { .. } => "mirror",
            DeviceKind::KbMirror { .. } => "kb_mirror",
            DeviceKind::Grating { .. } => "grating",
            DeviceKind::Aperture { .. } => "aperture",
        }
    }

    /// Comparable attributes contributed by the kind, in declaration order.
    ///
    /// The first entry is always `kind` itself.
    pub fn attributes(&self) -> Vec<(&'static str, FieldValue)> {
        let mut attributes = vec![("kind", FieldValue::Text(self.name().to_string()))];
        match self {
            DeviceKind::Generic => {}
            DeviceKind::Mirror {
                coating,
                radius_of_curvature,
            } => {
                attributes.push(("coating", FieldValue::text(coating.as_ref())));
                attributes.push((
                    "radius_of_curvature",
                    FieldValue::number(*radius_of_curvature),
                ));
            }
            DeviceKind::KbMirror {
                coating,
                focal_distance,
            } => {
                attributes.push(("coating", FieldValue::text(coating.as_ref())));
                attributes.push(("focal_distance", FieldValue::number(*focal_distance)));
            }
            DeviceKind::Grating {
                groove_density,
                blaze_angle,
            } => {
                attributes.push(("groove_density", FieldValue::number(*groove_density)));
                attributes.push(("blaze_angle", FieldValue::number(*blaze_angle)));
            }
            DeviceKind::Aperture { width, height } => {
                attributes.push(("width", FieldValue::number(*width)));
                attributes.push(("height", FieldValue::number(*height)));
            }
        }
        attributes
    }

    /// Look up one kind attribute by name.
    pub fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.attributes()
            .into_iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value)
    }

    /// Copy one attribute from another kind of the same variant.
    ///
    /// Copying `kind` replaces the whole payload.
    pub fn copy_attribute(&mut self, name: &str, from: &DeviceKind) -> Result<()> {
        if name == "kind" {
            *self = from.clone();
            return Ok(());
        }
        match (self, from) {
            (
                DeviceKind::Mirror {
                    coating,
                    radius_of_curvature,
                },
                DeviceKind::Mirror {
                    coating: src_coating,
                    radius_of_curvature: src_radius,
                },
            ) => match name {
                "coating" => *coating = src_coating.clone(),
                "radius_of_curvature" => *radius_of_curvature = *src_radius,
                _ => return Err(Error::UnknownField(name.to_string())),
            },
            (
                DeviceKind::KbMirror {
                    coating,
                    focal_distance,
                },
                DeviceKind::KbMirror {
                    coating: src_coating,
                    focal_distance: src_focal,
                },
            ) => match name {
                "coating" => *coating = src_coating.clone(),
                "focal_distance" => *focal_distance = *src_focal,
                _ => return Err(Error::UnknownField(name.to_string())),
            },
            (
                DeviceKind::Grating {
                    groove_density,
                    blaze_angle,
                },
                DeviceKind::Grating {
                    groove_density: src_density,
                    blaze_angle: src_blaze,
                },
            ) => match name {
                "groove_density" => *groove_density = *src_density,
                "blaze_angle" => *blaze_angle = *src_blaze,
                _ => return Err(Error::UnknownField(name.to_string())),
            },
            (
                DeviceKind::Aperture { width, height },
                DeviceKind::Aperture {
                    width: src_width,
                    height: src_height,
                },
            ) => match name {
                "width" => *width = *src_width,
                "height" => *height = *src_height,
                _ => return Err(Error::UnknownField(name.to_string())),
            },
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

/// A device row: one FC/FG pair owned by a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Device {
    /// Identifier assigned by the owning project
    #[serde(default)]
    pub id: DeviceId,
    pub fc: Fc,
    pub fg: Fg,
    /// Lifecycle state, see [`DeviceState`]
    #[serde(default)]
    pub state: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tc_part_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_loc_x: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_loc_y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_loc_z: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_dim_x: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_dim_y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_dim_z: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_ang_x: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_ang_y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_ang_z: Option<f64>,
    #[serde(
        default,
        deserialize_with = "normalize::optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub ray_trace: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discussion: Vec<Comment>,
    #[serde(default)]
    pub kind: DeviceKind,
}

impl Device {
    /// Create a device with no attributes set.
    pub fn new(id: impl Into<DeviceId>, fc: impl Into<Fc>, fg: impl Into<Fg>) -> Self {
        Self {
            id: id.into(),
            fc: fc.into(),
            fg: fg.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.fc.clone(), self.fg.clone())
    }

    /// Interpreted lifecycle state.
    pub fn lifecycle(&self) -> DeviceState {
        DeviceState::parse(&self.state)
    }
}

/// Approval status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Development,
    Submitted,
    Approved,
    Rejected,
}

/// A named container of devices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub editors: Vec<String>,
    #[serde(default)]
    pub approvers: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }
}
