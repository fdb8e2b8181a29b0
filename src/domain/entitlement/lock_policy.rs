//! Modification lock policy.
//!
//! Once a "yes" decision has opened a coverage period, the contribution is
//! locked for a minimum commitment window. Elapsed time is counted in whole
//! calendar days; the record unlocks only when strictly more than
//! [`LOCK_WINDOW_DAYS`] have passed (day 30 is still locked, day 31 is not).

use chrono::{Duration, NaiveDate};

/// Length of the commitment window in days.
pub const LOCK_WINDOW_DAYS: i64 = 30;

/// Outcome of evaluating the lock for a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The contribution may be edited.
    Unlocked,
    /// The contribution is protected until `unlocks_on`.
    Locked {
        period_start: NaiveDate,
        unlocks_on: NaiveDate,
    },
}

impl LockState {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, LockState::Unlocked)
    }
}

/// Whole days between `period_start` and `today`. Negative when `today`
/// precedes the start.
pub fn elapsed_days(period_start: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(period_start).num_days()
}

/// First date on which a contribution started on `period_start` can be edited.
pub fn unlocks_on(period_start: NaiveDate) -> NaiveDate {
    period_start
        .checked_add_signed(Duration::days(LOCK_WINDOW_DAYS + 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Evaluates the lock for a contribution whose period started on `period_start`.
pub fn evaluate(period_start: Option<NaiveDate>, today: NaiveDate) -> LockState {
    match period_start {
        None => LockState::Unlocked,
        Some(start) if elapsed_days(start, today) > LOCK_WINDOW_DAYS => LockState::Unlocked,
        Some(start) => LockState::Locked {
            period_start: start,
            unlocks_on: unlocks_on(start),
        },
    }
}

/// Returns true iff a contribution with this `period_start` may be edited today.
///
/// A contribution with no recorded period is always editable.
pub fn can_modify(period_start: Option<NaiveDate>, today: NaiveDate) -> bool {
    evaluate(period_start, today).is_unlocked()
}
