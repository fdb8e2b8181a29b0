//! Contribution aggregate entity.
//!
//! A Contribution (cotisation) records a member's payment decision and the
//! coverage period it opened. Each member has exactly one contribution
//! record, edited in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{
    derive, lock_policy, Decision, DerivedEntitlement, EntitlementError, EntitlementStatus,
    LockState,
};
use crate::domain::foundation::{ContributionId, MemberId, Timestamp, ValidationError};

/// Contribution aggregate.
///
/// # Invariants
///
/// - `decision = Yes` ⇒ `period_start` is set and `period_end` is `None`
/// - `decision = No` ⇒ `period_start` and `period_end` are both `None`
/// - `version` increases by one on every applied change; storage uses it
///   for compare-and-swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub member_id: MemberId,
    pub decision: Decision,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contribution {
    /// Opens the contribution record for a newly registered member.
    pub fn open(
        id: ContributionId,
        member_id: MemberId,
        decision: Decision,
        today: NaiveDate,
        now: Timestamp,
    ) -> Self {
        let derived = derive(decision, today);
        Self {
            id,
            member_id,
            decision,
            period_start: derived.period_start,
            period_end: derived.period_end,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a contribution from persisted state.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the stored period contradicts the decision.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ContributionId,
        member_id: MemberId,
        decision: Decision,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let contribution = Self {
            id,
            member_id,
            decision,
            period_start,
            period_end,
            version,
            created_at,
            updated_at,
        };
        contribution.check_invariants()?;
        Ok(contribution)
    }

    /// Entitlement implied by the current decision and period.
    pub fn entitlement(&self) -> DerivedEntitlement {
        DerivedEntitlement {
            entitlement_status: EntitlementStatus::from(self.decision),
            period_start: self.period_start,
            period_end: self.period_end,
        }
    }

    pub fn lock_state(&self, today: NaiveDate) -> LockState {
        lock_policy::evaluate(self.period_start, today)
    }

    pub fn can_modify(&self, today: NaiveDate) -> bool {
        self.lock_state(today).is_unlocked()
    }

    /// Applies a new decision taking effect on `today`.
    ///
    /// Returns the derived entitlement the owning member must receive in the
    /// same commit.
    ///
    /// # Errors
    ///
    /// `ModificationLocked` if the current period is inside its lock window.
    /// The record is left untouched.
    pub fn apply(
        &mut self,
        decision: Decision,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<DerivedEntitlement, EntitlementError> {
        if let LockState::Locked {
            period_start,
            unlocks_on,
        } = self.lock_state(today)
        {
            return Err(EntitlementError::modification_locked(
                self.id,
                period_start,
                unlocks_on,
            ));
        }

        let derived = derive(decision, today);
        self.decision = decision;
        self.period_start = derived.period_start;
        self.period_end = derived.period_end;
        self.version += 1;
        self.updated_at = now;
        Ok(derived)
    }

    /// Version the stored row must still carry for this change to commit.
    pub fn expected_stored_version(&self) -> u64 {
        self.version.saturating_sub(1)
    }

    fn check_invariants(&self) -> Result<(), ValidationError> {
        match (self.decision, self.period_start, self.period_end) {
            (Decision::Yes, Some(_), None) | (Decision::No, None, None) => Ok(()),
            (Decision::Yes, None, _) => Err(ValidationError::invalid_format(
                "period_start",
                "a yes decision must record its period start",
            )),
            (Decision::Yes, Some(_), Some(_)) => Err(ValidationError::invalid_format(
                "period_end",
                "a yes decision has an open-ended period",
            )),
            (Decision::No, _, _) => Err(ValidationError::invalid_format(
                "period_start",
                "a no decision records no period",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open(decision: Decision, today: NaiveDate) -> Contribution {
        Contribution::open(
            ContributionId::new(),
            MemberId::new(),
            decision,
            today,
            Timestamp::start_of(today),
        )
    }

    #[test]
    fn open_derives_period_from_decision() {
        let yes = open(Decision::Yes, date(2024, 1, 10));
        assert_eq!(yes.period_start, Some(date(2024, 1, 10)));
        assert_eq!(yes.version, 1);

        let no = open(Decision::No, date(2024, 1, 10));
        assert_eq!(no.period_start, None);
        assert_eq!(no.entitlement().entitlement_status, EntitlementStatus::NotEntitled);
    }

    #[test]
    fn apply_on_unlocked_record_bumps_version() {
        let mut c = open(Decision::No, date(2024, 1, 1));
        let derived = c
            .apply(Decision::Yes, date(2024, 1, 10), Timestamp::start_of(date(2024, 1, 10)))
            .unwrap();

        assert_eq!(derived.entitlement_status, EntitlementStatus::Entitled);
        assert_eq!(c.decision, Decision::Yes);
        assert_eq!(c.period_start, Some(date(2024, 1, 10)));
        assert_eq!(c.version, 2);
        assert_eq!(c.expected_stored_version(), 1);
    }

    #[test]
    fn apply_inside_window_is_rejected_without_change() {
        let mut c = open(Decision::Yes, date(2024, 1, 10));
        let before = c.clone();

        let err = c
            .apply(Decision::No, date(2024, 1, 25), Timestamp::start_of(date(2024, 1, 25)))
            .unwrap_err();

        assert!(matches!(
            err,
            EntitlementError::ModificationLocked { unlocks_on, .. } if unlocks_on == date(2024, 2, 10)
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn apply_after_window_clears_period() {
        let mut c = open(Decision::Yes, date(2024, 1, 10));
        let derived = c
            .apply(Decision::No, date(2024, 2, 15), Timestamp::start_of(date(2024, 2, 15)))
            .unwrap();

        assert_eq!(derived.entitlement_status, EntitlementStatus::NotEntitled);
        assert_eq!(c.period_start, None);
        assert_eq!(c.period_end, None);
    }

    #[test]
    fn restore_rejects_contradictory_state() {
        let now = Timestamp::now();
        let result = Contribution::restore(
            ContributionId::new(),
            MemberId::new(),
            Decision::No,
            Some(date(2024, 1, 1)),
            None,
            3,
            now,
            now,
        );
        assert!(result.is_err());

        let result = Contribution::restore(
            ContributionId::new(),
            MemberId::new(),
            Decision::Yes,
            None,
            None,
            3,
            now,
            now,
        );
        assert_eq!(result.unwrap_err().field(), "period_start");
    }
}
