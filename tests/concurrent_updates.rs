//! Concurrent contribution updates racing on one record.
//!
//! The store's version compare-and-swap must let at most one writer commit
//! per observed version, and the member's entitlement must match the
//! contribution's decision once the dust settles.

mod common;

use std::sync::Arc;

use common::{date, World};

use mutuelle_entitlement::application::UpdateContributionCommand;
use mutuelle_entitlement::domain::entitlement::{Decision, EntitlementError, EntitlementStatus};
use mutuelle_entitlement::ports::{ContributionRepository, MemberRepository};

const RACERS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_concurrent_opt_in_commits() {
    let world = World::on(date(2024, 1, 10));
    let registered = world
        .register("C1000", Decision::No, date(2023, 9, 1))
        .await;
    world.clock.set_date(date(2024, 1, 10));
    let handler = Arc::new(world.update_handler());

    let mut tasks = Vec::with_capacity(RACERS);
    for _ in 0..RACERS {
        let handler = handler.clone();
        let contribution_id = registered.contribution.id;
        tasks.push(tokio::spawn(async move {
            handler
                .handle(UpdateContributionCommand {
                    contribution_id,
                    decision: Decision::Yes,
                })
                .await
        }));
    }

    let mut committed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => committed += 1,
            Err(EntitlementError::Conflict(_)) | Err(EntitlementError::ModificationLocked { .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert_eq!(committed, 1);

    let contribution =
        ContributionRepository::find_by_id(world.store.as_ref(), &registered.contribution.id)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(contribution.version, 2);
    assert_eq!(contribution.period_start, Some(date(2024, 1, 10)));

    let member = MemberRepository::find_by_id(world.store.as_ref(), &registered.member.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.entitlement_status(), EntitlementStatus::Entitled);
    assert_eq!(world.bus.events_of_type("contribution.updated.v1").len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mixed_racers_leave_member_consistent_with_contribution() {
    let world = World::on(date(2024, 1, 1));
    let registered = world
        .register("C2000", Decision::Yes, date(2023, 6, 1))
        .await;
    world.clock.set_date(date(2024, 1, 1));
    let handler = Arc::new(world.update_handler());

    let mut tasks = Vec::with_capacity(RACERS);
    for i in 0..RACERS {
        let handler = handler.clone();
        let contribution_id = registered.contribution.id;
        let decision = if i % 2 == 0 { Decision::No } else { Decision::Yes };
        tasks.push(tokio::spawn(async move {
            handler
                .handle(UpdateContributionCommand {
                    contribution_id,
                    decision,
                })
                .await
        }));
    }

    let mut committed = 0u64;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => committed += 1,
            Err(err) => assert!(
                matches!(
                    err,
                    EntitlementError::Conflict(_) | EntitlementError::ModificationLocked { .. }
                ),
                "unexpected error: {}",
                err
            ),
        }
    }
    assert!(committed >= 1);

    let contribution =
        ContributionRepository::find_by_id(world.store.as_ref(), &registered.contribution.id)
            .await
            .unwrap()
            .unwrap();
    let member = MemberRepository::find_by_id(world.store.as_ref(), &registered.member.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(contribution.version, 1 + committed);
    assert_eq!(
        member.entitlement_status(),
        EntitlementStatus::from(contribution.decision)
    );
}
