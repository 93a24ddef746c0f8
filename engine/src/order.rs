//! Deterministic ordering of reconciliation output.
//!
//! The grouping map used by the reconciler has no iteration order, so every
//! bucket is sorted before it is returned. Strings compare case-sensitively
//! by byte order, except that empty strings always sort last, in either
//! direction.

use crate::{compare::FieldDiff, reconcile::UpdatedPair, Device, Field};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Compare two strings in the given direction, empty strings last.
pub fn compare_text(a: &str, b: &str, direction: SortDirection) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
    }
}

/// Order devices by `fc`, then `fg`.
pub fn compare_devices(a: &Device, b: &Device) -> Ordering {
    compare_text(&a.fc, &b.fc, SortDirection::Asc)
        .then_with(|| compare_text(&a.fg, &b.fg, SortDirection::Asc))
}

/// Sort a `new`, `missing` or `identical` bucket.
pub fn sort_devices(devices: &mut [Device]) {
    devices.sort_by(compare_devices);
}

/// Sort the `updated` bucket by the A side's `fc`, then `fg`.
pub fn sort_updated(pairs: &mut [UpdatedPair]) {
    pairs.sort_by(|x, y| compare_devices(&x.a, &y.a));
}

/// Sort field differences into canonical field order.
///
/// Names that are not known fields keep their relative order after all
/// known ones.
pub fn sort_field_diffs(diffs: &mut [FieldDiff]) {
    diffs.sort_by_key(|diff| Field::from_name(&diff.field).map_or(usize::MAX, Field::rank));
}
