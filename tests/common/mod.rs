//! Shared wiring for integration tests: in-memory store, fixed clock and
//! event bus behind the real handlers.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;

use mutuelle_entitlement::adapters::{FixedClock, InMemoryEntitlementStore, InMemoryEventBus};
use mutuelle_entitlement::application::{
    CheckClaimEligibilityHandler, FileClaimHandler, GetMemberHandler, RegisterMemberCommand,
    RegisterMemberHandler, RegisterMemberResult, UpdateClaimDetailsHandler,
    UpdateContributionHandler, UpdateMemberProfileHandler,
};
use mutuelle_entitlement::domain::claim::ClaimDetails;
use mutuelle_entitlement::domain::entitlement::Decision;
use mutuelle_entitlement::domain::foundation::NationalId;
use mutuelle_entitlement::domain::member::{
    BankAccount, EmploymentStatus, MemberProfile, Organization, PhoneNumber, Sex,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn profile(national_id: &str) -> MemberProfile {
    MemberProfile {
        national_id: NationalId::new(national_id).unwrap(),
        last_name: "Bennani".to_string(),
        first_name: "Youssef".to_string(),
        birth_date: date(1975, 11, 3),
        sex: Sex::Male,
        hire_date: Some(date(1999, 2, 15)),
        employment_status: EmploymentStatus::Active,
        phone: PhoneNumber::new("0661-223344").unwrap(),
        bank_account: BankAccount::new("230780000987654321098765").unwrap(),
        city: "Agadir".to_string(),
        address: "Port d'Agadir, Bloc C".to_string(),
        salary_cents: 980_000,
        employer: Organization::Anp,
        contribution_section: Organization::Anp,
    }
}

pub fn claim_details() -> ClaimDetails {
    ClaimDetails {
        receipt_number: "FS-2024-118".to_string(),
        amount_cents: 78_500,
        beneficiary: Some("spouse".to_string()),
        care_start: date(2024, 2, 20),
        care_end: date(2024, 2, 22),
        status: None,
    }
}

pub struct World {
    pub store: Arc<InMemoryEntitlementStore>,
    pub clock: Arc<FixedClock>,
    pub bus: Arc<InMemoryEventBus>,
}

impl World {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            store: Arc::new(InMemoryEntitlementStore::new()),
            clock: Arc::new(FixedClock::on(today)),
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    pub fn register_handler(&self) -> RegisterMemberHandler {
        RegisterMemberHandler::new(self.store.clone(), self.clock.clone(), self.bus.clone())
    }

    pub fn update_handler(&self) -> UpdateContributionHandler {
        UpdateContributionHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
            self.bus.clone(),
        )
    }

    pub fn file_claim_handler(&self) -> FileClaimHandler {
        FileClaimHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
            self.bus.clone(),
        )
    }

    pub fn eligibility_handler(&self) -> CheckClaimEligibilityHandler {
        CheckClaimEligibilityHandler::new(self.store.clone())
    }

    pub fn profile_handler(&self) -> UpdateMemberProfileHandler {
        UpdateMemberProfileHandler::new(self.store.clone(), self.clock.clone(), self.bus.clone())
    }

    pub fn claim_details_handler(&self) -> UpdateClaimDetailsHandler {
        UpdateClaimDetailsHandler::new(self.store.clone(), self.clock.clone(), self.bus.clone())
    }

    pub fn member_detail_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
        )
    }

    /// Registers a member on `on` and leaves the clock there.
    pub async fn register(
        &self,
        national_id: &str,
        decision: Decision,
        on: NaiveDate,
    ) -> RegisterMemberResult {
        self.clock.set_date(on);
        self.register_handler()
            .handle(RegisterMemberCommand {
                profile: profile(national_id),
                initial_decision: decision,
            })
            .await
            .unwrap()
    }
}
