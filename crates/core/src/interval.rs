//! Participation intervals and the overlap predicate.
//!
//! Two intervals overlap iff `s1 <= e2 && e1 >= s2` -- boundary touch counts.
//! An appearance ending at the exact second another begins is a conflict, so
//! back-to-back participations must leave at least a one-second gap.

use crate::error::{CoreError, CoreResult};
use crate::timecode::Timecode;
use crate::types::DbId;

/// An ordered `(start, end)` pair of timecodes bounding a participation.
///
/// Invariant: `start < end`, strict. Enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: Timecode,
    end: Timecode,
}

impl Interval {
    /// Build an interval, failing with [`CoreError::OrderViolation`] when
    /// `start >= end`.
    pub fn new(start: Timecode, end: Timecode) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::OrderViolation {
                init: start.to_string(),
                finish: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timecode {
        self.start
    }

    pub fn end(&self) -> Timecode {
        self.end
    }

    /// Inclusive-boundary overlap check. Symmetric.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Find the first existing interval the candidate overlaps, skipping the
/// entry identified by `exclude` (a participation's own id during updates).
///
/// The caller supplies `existing` already filtered to one
/// `(character, episode)` pair; this function is pure and does no I/O.
pub fn first_conflict(
    candidate: &Interval,
    existing: &[(DbId, Interval)],
    exclude: Option<DbId>,
) -> Option<DbId> {
    existing
        .iter()
        .filter(|(id, _)| Some(*id) != exclude)
        .find(|(_, interval)| candidate.overlaps(interval))
        .map(|(id, _)| *id)
}
