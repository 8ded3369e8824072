//! Scheduling primitives: closed date windows and derived assignment phases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation errors raised by [`DateWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowValidationError {
    /// The end date precedes the start date.
    #[error("end date must not precede start date")]
    EndsBeforeStart,
}

/// Closed date interval `[start, end]`.
///
/// ## Invariants
/// - `start <= end`; a single-day window has `start == end`.
///
/// Two windows overlap when `a.start <= b.end && a.end >= b.start`; both
/// bounds are inclusive, so single-day windows participate in overlap like
/// any other. Only serialisation is derived; construction always goes
/// through [`DateWindow::new`] so the ordering invariant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Construct a validated window from its bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowValidationError> {
        if end < start {
            return Err(WindowValidationError::EndsBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// Collapse a single day into a window, for point-in-time queries.
    #[must_use]
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day covered by the window.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day covered by the window.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive-bound overlap test.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DateWindow;
    /// use chrono::NaiveDate;
    ///
    /// let date = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
    /// let a = DateWindow::new(date(1), date(10)).unwrap();
    /// let b = DateWindow::new(date(10), date(20)).unwrap();
    /// assert!(a.overlaps(&b));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Derived, view-only classification of an assignment relative to "today".
///
/// Never stored and never an enforced transition; recomputed at read time
/// from the assignment window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPhase {
    /// The window starts after today.
    Upcoming,
    /// The window contains today.
    Current,
    /// The window ended before today.
    Completed,
}

impl AssignmentPhase {
    /// Classify a window against a reference day.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AssignmentPhase, DateWindow};
    /// use chrono::NaiveDate;
    ///
    /// let date = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
    /// let window = DateWindow::new(date(5), date(5)).unwrap();
    /// assert_eq!(
    ///     AssignmentPhase::classify(date(5), &window),
    ///     AssignmentPhase::Current
    /// );
    /// ```
    #[must_use]
    pub fn classify(today: NaiveDate, window: &DateWindow) -> Self {
        if window.start() > today {
            Self::Upcoming
        } else if window.end() < today {
            Self::Completed
        } else {
            Self::Current
        }
    }
}

impl std::fmt::Display for AssignmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Upcoming => "upcoming",
            Self::Current => "current",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}
