//! UpdateMemberProfileHandler - Command handler for editing demographics.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{EventId, MemberId};
use crate::domain::member::{Member, MemberProfile, MemberProfileUpdated};
use crate::ports::{Clock, EventPublisher, MemberRepository};

/// Command to replace a member's profile.
///
/// Carries no entitlement field: entitlement only follows the contribution.
#[derive(Debug, Clone)]
pub struct UpdateMemberProfileCommand {
    pub member_id: MemberId,
    pub profile: MemberProfile,
}

/// Result of a profile edit.
#[derive(Debug, Clone)]
pub struct UpdateMemberProfileResult {
    pub member: Member,
    pub event: MemberProfileUpdated,
}

/// Handler for member profile edits.
pub struct UpdateMemberProfileHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateMemberProfileHandler {
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
        cmd: UpdateMemberProfileCommand,
    ) -> Result<UpdateMemberProfileResult, EntitlementError> {
        // 1. Validate
        cmd.profile.validate()?;

        // 2. Load the member
        let mut member = self
            .members
            .find_by_id(&cmd.member_id)
            .await?
            .ok_or_else(|| EntitlementError::member_not_found(cmd.member_id))?;
        let previous_national_id = member.profile.national_id.clone();

        // 3. A changed national ID must still be unique
        let national_id = cmd.profile.national_id.clone();
        if national_id != previous_national_id {
            if let Some(owner) = self.members.find_by_national_id(&national_id).await? {
                if owner.id != member.id {
                    warn!(
                        member_id = %member.id,
                        national_id = %national_id,
                        "national ID belongs to another member"
                    );
                    return Err(EntitlementError::member_already_exists(national_id.as_str()));
                }
            }
        }

        // 4. Apply and persist
        let now = self.clock.now();
        member.update_profile(cmd.profile, now)?;
        self.members.update_profile(&member).await?;

        info!(
            member_id = %member.id,
            member_number = %member.member_number,
            "member profile updated"
        );

        // 5. Publish after commit
        let event = MemberProfileUpdated {
            event_id: EventId::new(),
            member_id: member.id,
            member_number: member.member_number.clone(),
            previous_national_id,
            national_id,
            updated_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(UpdateMemberProfileResult { member, event })
    }
}
