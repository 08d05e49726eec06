// Error types for the lock coordination core
// Display strings of the lock/unlock variants are part of the public HTTP contract

use std::time::Duration;

use thiserror::Error;

/// Failure to parse a duration literal such as `"1s"` or `"1h30m"`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration \"\": empty input")]
    Empty,

    #[error("invalid duration \"{0}\"")]
    Invalid(String),

    #[error("missing unit in duration \"{0}\"")]
    MissingUnit(String),

    #[error("unknown unit \"{unit}\" in duration \"{input}\"")]
    UnknownUnit { unit: String, input: String },

    #[error("negative duration \"{0}\"")]
    Negative(String),

    #[error("duration \"{0}\" is out of range")]
    Overflow(String),
}

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Malformed lock/unlock parameters. Never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.to_string(),
                code: code.to_string(),
                message: message.into(),
            }],
        }
    }

    /// Whether `field` is among the rejected fields
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Transient failure of the backing store (connectivity, timeout)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store unavailable: operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Lock acquisition outcome other than success.
///
/// `LockedByOther` carries the *requesting* owner, not the holder. Clients
/// match on the rendered message, so this stays as observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("{target} is already locked.")]
    AlreadyLocked { target: String },

    #[error("{target} is locked by {owner}.")]
    LockedByOther { target: String, owner: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Lock release outcome other than success.
///
/// `OwnerMismatch` carries the *requesting* owner, same convention as
/// [`LockError::LockedByOther`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnlockError {
    #[error("{target} haven't locked")]
    NotLocked { target: String },

    #[error("{target} don't release lock, because lock owner isn't {owner}")]
    OwnerMismatch { target: String, owner: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LockError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            LockError::AlreadyLocked { .. } => "already_locked",
            LockError::LockedByOther { .. } => "locked_by_other",
            LockError::Store(_) => "store_unavailable",
        }
    }
}

impl UnlockError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            UnlockError::NotLocked { .. } => "not_locked",
            UnlockError::OwnerMismatch { .. } => "owner_mismatch",
            UnlockError::Store(_) => "store_unavailable",
        }
    }
}
