//! RegisterMemberHandler - Command handler for member registration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::contribution::Contribution;
use crate::domain::entitlement::{derive, Decision, EntitlementError};
use crate::domain::foundation::{ContributionId, EventId, MemberId};
use crate::domain::member::{Member, MemberProfile, MemberRegistered};
use crate::ports::{Clock, EventPublisher, MemberRepository};

/// Command to register a member with their initial contribution decision.
#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub profile: MemberProfile,
    pub initial_decision: Decision,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterMemberResult {
    pub member: Member,
    pub contribution: Contribution,
    pub event: MemberRegistered,
}

/// Handler for registering members.
///
/// The member and its single contribution record are written in one step,
/// with the initial entitlement taken from the derivation of the initial
/// decision.
pub struct RegisterMemberHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RegisterMemberHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            members,
            clock,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterMemberCommand,
    ) -> Result<RegisterMemberResult, EntitlementError> {
        let today = self.clock.today();
        let now = self.clock.now();

        // 1. Validate before consuming a member number
        cmd.profile.validate()?;

        // 2. National ID must be unique
        let national_id = cmd.profile.national_id.clone();
        if self.members.find_by_national_id(&national_id).await?.is_some() {
            warn!(national_id = %national_id, "member already registered");
            return Err(EntitlementError::member_already_exists(national_id.as_str()));
        }

        // 3. Allocate the member number
        let member_number = self.members.next_member_number().await?;

        // 4. Derive the initial entitlement and build both records
        let derived = derive(cmd.initial_decision, today);
        let member = Member::register(MemberId::new(), member_number, cmd.profile, &derived, now)?;
        let contribution = Contribution::open(
            ContributionId::new(),
            member.id,
            cmd.initial_decision,
            today,
            now,
        );

        // 5. Persist atomically
        self.members.register(&member, &contribution).await?;

        info!(
            member_id = %member.id,
            member_number = %member.member_number,
            decision = %contribution.decision,
            entitlement_status = member.entitlement_status().as_str(),
            "member registered"
        );

        // 6. Publish after commit
        let event = MemberRegistered {
            event_id: EventId::new(),
            member_id: member.id,
            member_number: member.member_number.clone(),
            national_id,
            contribution_section: member.profile.contribution_section,
            initial_decision: contribution.decision,
            entitlement_status: member.entitlement_status(),
            registered_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(RegisterMemberResult {
            member,
            contribution,
            event,
        })
    }
}
