//! Capacity evaluation and assignment admission control.
//!
//! The evaluator is pure computation over data supplied by the caller: it
//! filters an engineer's assignments to those overlapping a query window,
//! sums their allocation percentages, and reports the remaining headroom
//! against the engineer's maximum capacity. Admission control applies that
//! evaluation to a proposed assignment, using the proposal's own window.
//!
//! The check runs exactly once, at creation time. Edits and deletes of
//! existing assignments are not re-validated, and nothing serialises the
//! read-then-write sequence around creation; two concurrent creations for
//! the same engineer can both pass and jointly overshoot the cap. That race
//! is inherited from the system this models and left open deliberately.

use serde::Serialize;

use crate::domain::assignment::Assignment;
use crate::domain::schedule::DateWindow;
use crate::domain::user::{User, UserId};

/// Failures produced by [`admit_assignment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The referenced engineer does not resolve. In practice the caller
    /// resolves the engineer first, but the contract defines the behaviour
    /// for an absent record too.
    #[error("Engineer not found")]
    EngineerNotFound,
    /// The proposed allocation exceeds the remaining headroom. Always
    /// recoverable by the submitter; the numeric headroom is surfaced so the
    /// client can adjust and resubmit.
    #[error("Engineer only has {available}% capacity left.")]
    CapacityExceeded {
        /// Remaining headroom over the proposed window; may be negative when
        /// stored data already over-commits the engineer.
        available: i32,
    },
}

/// Sum of allocation percentages over assignments overlapping `window`.
///
/// The caller supplies the full assignment set of a single engineer; this
/// function only applies the inclusive-bound overlap filter and the sum. The
/// sum is not clamped: inconsistently seeded data may exceed 100 and the
/// evaluator reports that truthfully rather than normalising it.
///
/// # Examples
/// ```
/// use backend::domain::committed_allocation;
/// use chrono::NaiveDate;
/// # use backend::domain::DateWindow;
///
/// let date = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// let window = DateWindow::new(date(8), date(20)).unwrap();
/// assert_eq!(committed_allocation(&window, &[]), 0);
/// ```
#[must_use]
pub fn committed_allocation(window: &DateWindow, assignments: &[Assignment]) -> i32 {
    assignments
        .iter()
        .filter(|assignment| assignment.window().overlaps(window))
        .map(|assignment| assignment.allocation().get())
        .sum()
}

/// Derived, non-persisted capacity figures for one engineer.
///
/// Always recomputed from the current assignment set, for either a single
/// instant (collapsed window) or a proposed assignment's range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySnapshot {
    /// Engineer the snapshot describes.
    pub engineer_id: UserId,
    /// Total assignable percentage.
    pub max_capacity: i32,
    /// Committed percentage over the query window.
    pub allocated: i32,
    /// `max_capacity - allocated`; negative once over-committed.
    pub available: i32,
}

impl CapacitySnapshot {
    /// Evaluate an engineer's committed and remaining capacity over a
    /// window.
    ///
    /// Callers decide how to react to a negative `available`; the snapshot
    /// itself just reports it.
    #[must_use]
    pub fn compute(engineer: &User, window: &DateWindow, assignments: &[Assignment]) -> Self {
        let max_capacity = engineer.max_capacity().get();
        let allocated = committed_allocation(window, assignments);
        Self {
            engineer_id: *engineer.id(),
            max_capacity,
            allocated,
            available: max_capacity - allocated,
        }
    }
}

/// Admit or reject a proposed allocation against remaining headroom.
///
/// Evaluates the engineer's committed allocation over the *proposed* window
/// (range mode, not point-in-time) and rejects when the proposal exceeds
/// what is left. An admitted proposal is persistable as-is; nothing here
/// mutates, rounds, or normalises it.
///
/// The proposed allocation arrives as a raw integer on purpose: a request
/// for 101% against a fresh engineer must fail *this* check and report the
/// 100% headroom, not trip input validation first.
///
/// # Errors
///
/// - [`AdmissionError::EngineerNotFound`] when `engineer` is `None`.
/// - [`AdmissionError::CapacityExceeded`] when
///   `allocation > max_capacity - committed`, carrying the headroom.
pub fn admit_assignment(
    engineer: Option<&User>,
    allocation: i32,
    window: &DateWindow,
    existing: &[Assignment],
) -> Result<(), AdmissionError> {
    let engineer = engineer.ok_or(AdmissionError::EngineerNotFound)?;
    let snapshot = CapacitySnapshot::compute(engineer, window, existing);
    if allocation > snapshot.available {
        return Err(AdmissionError::CapacityExceeded {
            available: snapshot.available,
        });
    }
    Ok(())
}
