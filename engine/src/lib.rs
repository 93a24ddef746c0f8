//! # FCFG Engine
//!
//! A deterministic reconciliation engine for FC/FG device configurations.
//!
//! Projects hold devices identified by a functional component (`fc`) and a
//! fungible group (`fg`). This crate compares two device collections (two
//! projects, or a project against one of its snapshots) and classifies every
//! device as new, missing, updated or identical, with field-level differences
//! for updated pairs.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about storage, HTTP or UI
//! - **Deterministic**: the same inputs, in any order, give the same output
//! - **Pure**: inputs are borrowed and never mutated; results are new values
//! - **Testable**: no mocks needed
//!
//! ## Core Concepts
//!
//! ### Devices
//!
//! A [`Device`] carries textual and optional numeric attributes, a lifecycle
//! state, a discussion thread and a [`DeviceKind`] with kind-specific
//! attributes. Absent numbers stay absent; they are never read as zero.
//!
//! ### Fields
//!
//! [`Field`] enumerates the comparable attributes in canonical order.
//! Identity (`id`, `fc`, `fg`) is never compared.
//!
//! ### Reconciliation
//!
//! The [`Reconciler`] groups both collections by [`DeviceKey`] and produces
//! a [`Diff`]:
//! - `new` - only in A
//! - `missing` - only in B
//! - `updated` - in both, with at least one differing field
//! - `identical` - in both, all comparable fields equal
//!
//! ### Time windows
//!
//! [`TimeWindow`] resolves `lastWeek`, `lastMonth` and `lastYear` into
//! inclusive day-aligned ranges for history queries.
//!
//! ## Quick Start
//!
//! ```rust
//! use fcfg_engine::{reconcile, Device};
//!
//! let mut planned = Device::new("d-1", "AT1L0", "SOLID");
//! planned.ray_trace = Some(0);
//! let mut installed = Device::new("d-9", "AT1L0", "SOLID");
//! installed.ray_trace = Some(1);
//!
//! let diff = reconcile(&[planned, Device::new("d-2", "IM1K0", "PPM")], &[installed]).unwrap();
//!
//! assert_eq!(diff.new.len(), 1);
//! assert_eq!(diff.updated.len(), 1);
//! assert_eq!(diff.updated[0].changes[0].field, "ray_trace");
//! ```

pub mod compare;
pub mod copy;
pub mod error;
pub mod field;
pub mod normalize;
pub mod order;
pub mod reconcile;
pub mod record;
pub mod snapshot;
pub mod window;

// Re-export main types at crate root
pub use compare::{changed_fields, field_value, fields_equal, has_changed, FieldDiff, FieldSet};
pub use copy::{apply_copy, CopyRequest};
pub use error::{Error, Side};
pub use field::{Field, FieldKind, FieldValue};
pub use normalize::normalize_device_value;
pub use order::{compare_text, SortDirection};
pub use reconcile::{
    reconcile, Diff, DiffSummary, DuplicatePolicy, ProjectComparison, ReconcileOptions,
    Reconciler, UpdatedPair,
};
pub use record::{Comment, Device, DeviceKey, DeviceKind, DeviceState, Project, ProjectStatus};
pub use snapshot::{
    latest_in_range, HistoryQuery, ProjectSnapshot, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
pub use window::{TimeRange, TimeWindow};

/// Type aliases for clarity
pub type Fc = String;
pub type Fg = String;
pub type DeviceId = String;
pub type ProjectId = String;
pub type Timestamp = u64;
