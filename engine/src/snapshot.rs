//! Project snapshots and history query parameters.
//!
//! A snapshot is a timestamped copy of a project's devices. History views
//! reconcile the live project (A) against a snapshot (B), so devices added
//! since the snapshot show up as new and removed ones as missing.
//!
//! How snapshots are stored is up to the caller; this module only defines
//! the shapes handed to and from the engine.

use crate::{
    error::Result,
    reconcile::{Diff, ReconcileOptions, Reconciler},
    window::{TimeRange, TimeWindow},
    Device, Project, ProjectId,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default number of history entries requested.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Maximum number of history entries requested.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// A point-in-time copy of a project's devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub project_id: ProjectId,
    /// Local wall-clock time the snapshot was taken
    pub taken_at: NaiveDateTime,
    pub devices: Vec<Device>,
}

impl ProjectSnapshot {
    /// Capture the current devices of a project.
    pub fn of(project: &Project, taken_at: NaiveDateTime) -> Self {
        Self {
            project_id: project.id.clone(),
            taken_at,
            devices: project.devices.clone(),
        }
    }
}

impl Project {
    /// Reconcile the live project (A) against one of its snapshots (B).
    pub fn compare_to_snapshot(
        &self,
        snapshot: &ProjectSnapshot,
        options: ReconcileOptions,
    ) -> Result<Diff> {
        if snapshot.project_id != self.id {
            tracing::warn!(
                "comparing project {} against a snapshot of project {}",
                self.id,
                snapshot.project_id
            );
        }
        Reconciler::new(options).reconcile(&self.devices, &snapshot.devices)
    }
}

/// The most recent snapshot taken inside `range`.
pub fn latest_in_range<'a>(
    snapshots: &'a [ProjectSnapshot],
    range: &TimeRange,
) -> Option<&'a ProjectSnapshot> {
    snapshots
        .iter()
        .filter(|snapshot| range.contains(snapshot.taken_at))
        .max_by_key(|snapshot| snapshot.taken_at)
}

/// Parameters of a history retrieval request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub project_id: ProjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    /// Maximum number of entries, within `1..=MAX_HISTORY_LIMIT`
    pub limit: usize,
}

impl HistoryQuery {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            start: None,
            end: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Restrict the query to an explicit range.
    pub fn within(mut self, range: TimeRange) -> Self {
        self.start = Some(range.start);
        self.end = Some(range.end);
        self
    }

    /// Restrict the query to a named window ending on `now`'s day.
    pub fn with_window(self, window: TimeWindow, now: NaiveDateTime) -> Self {
        self.within(window.resolve(now))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        self
    }

    /// The requested range, if both bounds are set.
    pub fn range(&self) -> Option<TimeRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TimeRange { start, end }),
            _ => None,
        }
    }
}
