//! Error types for the reconciliation engine.

use crate::{Fc, Fg};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which operand of a reconciliation a device came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// All possible errors from the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Input errors
    #[error("duplicate device ({fc}, {fg}) in collection {side}")]
    DuplicateKey { side: Side, fc: Fc, fg: Fg },

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    // Field errors
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field does not differ: {0}")]
    FieldNotDiffering(String),

    #[error("field {0} belongs to a different device kind; select kind as well")]
    KindMismatch(String),

    #[error("no fields selected")]
    EmptySelection,

    #[error("device key mismatch: ({source_fc}, {source_fg}) vs ({destination_fc}, {destination_fg})")]
    KeyMismatch {
        source_fc: Fc,
        source_fg: Fg,
        destination_fc: Fc,
        destination_fg: Fg,
    },

    // Time window errors
    #[error("unknown time window: {0}")]
    UnknownWindow(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::UnknownField("colour".into());
        assert_eq!(err.to_string(), "unknown field: colour");

        let err = Error::DuplicateKey {
            side: Side::B,
            fc: "AT1L0".into(),
            fg: "SLIT".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate device (AT1L0, SLIT) in collection B"
        );

        let err = Error::InvalidNumber("abc".into());
        assert_eq!(err.to_string(), "invalid number: \"abc\"");

        let err = Error::UnknownWindow("lastDecade".into());
        assert_eq!(err.to_string(), "unknown time window: lastDecade");
    }
}
