//! Fixtures shared by handler tests.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::adapters::clock::FixedClock;
use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::InMemoryEntitlementStore;
use crate::domain::contribution::Contribution;
use crate::domain::entitlement::{derive, Decision};
use crate::domain::foundation::{ContributionId, MemberId, Timestamp};
use crate::domain::member::{test_support::profile, Member};
use crate::ports::MemberRepository;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct Fixture {
    pub store: Arc<InMemoryEntitlementStore>,
    pub clock: Arc<FixedClock>,
    pub bus: Arc<InMemoryEventBus>,
}

impl Fixture {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            store: Arc::new(InMemoryEntitlementStore::new()),
            clock: Arc::new(FixedClock::on(today)),
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    /// Registers a member whose contribution `decision` was taken on `decided_on`.
    pub async fn seed(
        &self,
        national_id: &str,
        decision: Decision,
        decided_on: NaiveDate,
    ) -> (Member, Contribution) {
        let now = Timestamp::start_of(decided_on);
        let number = self.store.next_member_number().await.unwrap();
        let member = Member::register(
            MemberId::new(),
            number,
            profile(national_id),
            &derive(decision, decided_on),
            now,
        )
        .unwrap();
        let contribution =
            Contribution::open(ContributionId::new(), member.id, decision, decided_on, now);
        self.store.register(&member, &contribution).await.unwrap();
        (member, contribution)
    }
}
