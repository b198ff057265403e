//! Record state - tombstone for soft-deleted rows

use chrono::{DateTime, Utc};

/// Lifecycle of a soft-deletable record.
///
/// Storage keeps a nullable `deleted_at` column; the domain sees an explicit
/// state so that restoring a removed relation is a named transition
/// (`Active -> Removed -> Active`) rather than nulling a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordState {
    #[default]
    Active,
    Removed { at: DateTime<Utc> },
}

impl RecordState {
    /// Build from the storage column
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Removed { at },
            None => Self::Active,
        }
    }

    /// Storage column value
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Removed { at } => Some(*at),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        !self.is_active()
    }

    /// Mark as removed; removing twice keeps the first timestamp
    pub fn remove(&mut self, at: DateTime<Utc>) {
        if self.is_active() {
            *self = Self::Removed { at };
        }
    }

    pub fn restore(&mut self) {
        *self = Self::Active;
    }
}
