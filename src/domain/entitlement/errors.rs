//! Entitlement lifecycle error types.
//!
//! # Caller Guidance
//!
//! | Error | Retry? | Typical handling |
//! |-------|--------|------------------|
//! | ContributionNotFound / MemberNotFound / ClaimNotFound | no | 404 |
//! | MemberAlreadyExists | no | 409 |
//! | InvalidDecision | no | caller bug, 400 |
//! | ModificationLocked | no | show unlock date |
//! | NotEntitled | no | refuse claim entry |
//! | InvalidState | no | 409 |
//! | ValidationFailed | no | 400 |
//! | Rejected | no | surface message |
//! | Conflict | yes | re-read then retry |
//! | RepositoryUnavailable | yes | back off |

use chrono::NaiveDate;
use std::str::FromStr;

use crate::domain::foundation::{
    ClaimId, ContributionId, DomainError, ErrorCode, MemberId, ValidationError,
};

/// Errors surfaced by entitlement lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitlementError {
    /// Contribution record was not found.
    ContributionNotFound(ContributionId),

    /// The member exists but has no contribution record.
    NoContributionForMember(MemberId),

    /// Member was not found.
    MemberNotFound(MemberId),

    /// A member with this national ID is already registered.
    MemberAlreadyExists(String),

    /// Claim was not found.
    ClaimNotFound(ClaimId),

    /// Decision value is neither yes nor no.
    InvalidDecision(String),

    /// Contribution is still inside its commitment window.
    ModificationLocked {
        contribution_id: ContributionId,
        period_start: NaiveDate,
        unlocks_on: NaiveDate,
    },

    /// Member is not entitled to file claims.
    NotEntitled(MemberId),

    /// Invalid state for the requested operation.
    InvalidState {
        current: String,
        attempted: String,
    },

    /// Validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// A business rule rejected the operation but the port did not report
    /// enough detail to rebuild the typed variant.
    Rejected { code: ErrorCode, message: String },

    /// A concurrent write changed the record first.
    Conflict(String),

    /// Storage could not be reached or failed mid-transaction.
    RepositoryUnavailable(String),
}

impl EntitlementError {
    pub fn contribution_not_found(id: ContributionId) -> Self {
        EntitlementError::ContributionNotFound(id)
    }

    pub fn no_contribution_for_member(member_id: MemberId) -> Self {
        EntitlementError::NoContributionForMember(member_id)
    }

    pub fn member_not_found(id: MemberId) -> Self {
        EntitlementError::MemberNotFound(id)
    }

    pub fn member_already_exists(national_id: impl Into<String>) -> Self {
        EntitlementError::MemberAlreadyExists(national_id.into())
    }

    pub fn claim_not_found(id: ClaimId) -> Self {
        EntitlementError::ClaimNotFound(id)
    }

    pub fn invalid_decision(raw: impl Into<String>) -> Self {
        EntitlementError::InvalidDecision(raw.into())
    }

    pub fn modification_locked(
        contribution_id: ContributionId,
        period_start: NaiveDate,
        unlocks_on: NaiveDate,
    ) -> Self {
        EntitlementError::ModificationLocked {
            contribution_id,
            period_start,
            unlocks_on,
        }
    }

    pub fn not_entitled(member_id: MemberId) -> Self {
        EntitlementError::NotEntitled(member_id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        EntitlementError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EntitlementError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        EntitlementError::Conflict(message.into())
    }

    pub fn repository_unavailable(message: impl Into<String>) -> Self {
        EntitlementError::RepositoryUnavailable(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EntitlementError::ContributionNotFound(_)
            | EntitlementError::NoContributionForMember(_) => ErrorCode::ContributionNotFound,
            EntitlementError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            EntitlementError::MemberAlreadyExists(_) => ErrorCode::MemberExists,
            EntitlementError::ClaimNotFound(_) => ErrorCode::ClaimNotFound,
            EntitlementError::InvalidDecision(_) => ErrorCode::InvalidDecision,
            EntitlementError::ModificationLocked { .. } => ErrorCode::ModificationLocked,
            EntitlementError::NotEntitled(_) => ErrorCode::NotEntitled,
            EntitlementError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            EntitlementError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EntitlementError::Rejected { code, .. } => *code,
            EntitlementError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            EntitlementError::RepositoryUnavailable(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EntitlementError::ContributionNotFound(id) => {
                format!("Contribution not found: {}", id)
            }
            EntitlementError::NoContributionForMember(member_id) => {
                format!("No contribution recorded for member: {}", member_id)
            }
            EntitlementError::MemberNotFound(id) => format!("Member not found: {}", id),
            EntitlementError::MemberAlreadyExists(national_id) => {
                format!("A member with national ID {} is already registered", national_id)
            }
            EntitlementError::ClaimNotFound(id) => format!("Claim not found: {}", id),
            EntitlementError::InvalidDecision(raw) => {
                format!("Invalid contribution decision: '{}'", raw)
            }
            EntitlementError::ModificationLocked { unlocks_on, .. } => format!(
                "Modification is only possible one month after the period start date (available from {})",
                unlocks_on
            ),
            EntitlementError::NotEntitled(member_id) => {
                format!("Member {} is not entitled to file claims", member_id)
            }
            EntitlementError::InvalidState { current, attempted } => {
                format!("Cannot {} claim in {} state", attempted, current)
            }
            EntitlementError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EntitlementError::Rejected { message, .. } => message.clone(),
            EntitlementError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            EntitlementError::RepositoryUnavailable(msg) => {
                format!("Repository unavailable: {}", msg)
            }
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EntitlementError::Conflict(_) | EntitlementError::RepositoryUnavailable(_)
        )
    }
}

impl std::fmt::Display for EntitlementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EntitlementError {}

impl From<DomainError> for EntitlementError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned();
        let rejected = |err: DomainError| EntitlementError::Rejected {
            code: err.code,
            message: err.message,
        };

        match err.code {
            ErrorCode::ConcurrencyConflict => EntitlementError::Conflict(err.message),
            ErrorCode::DatabaseError => EntitlementError::RepositoryUnavailable(err.message),
            ErrorCode::Timeout | ErrorCode::InternalError => {
                EntitlementError::RepositoryUnavailable(err.to_string())
            }
            ErrorCode::ValidationFailed => EntitlementError::ValidationFailed {
                field: detail("field").unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidDecision => {
                EntitlementError::InvalidDecision(detail("value").unwrap_or(err.message))
            }
            ErrorCode::MemberExists => EntitlementError::MemberAlreadyExists(
                detail("national_id").unwrap_or(err.message),
            ),
            ErrorCode::ContributionNotFound => match (
                parsed_detail(&err, "id"),
                parsed_detail(&err, "member_id"),
            ) {
                (Some(id), _) => EntitlementError::ContributionNotFound(id),
                (None, Some(member_id)) => EntitlementError::NoContributionForMember(member_id),
                (None, None) => rejected(err),
            },
            ErrorCode::MemberNotFound => match parsed_detail(&err, "id") {
                Some(id) => EntitlementError::MemberNotFound(id),
                None => rejected(err),
            },
            ErrorCode::ClaimNotFound => match parsed_detail(&err, "id") {
                Some(id) => EntitlementError::ClaimNotFound(id),
                None => rejected(err),
            },
            ErrorCode::ModificationLocked => match (
                parsed_detail(&err, "id"),
                parsed_detail(&err, "period_start"),
                parsed_detail(&err, "unlocks_on"),
            ) {
                (Some(contribution_id), Some(period_start), Some(unlocks_on)) => {
                    EntitlementError::ModificationLocked {
                        contribution_id,
                        period_start,
                        unlocks_on,
                    }
                }
                _ => rejected(err),
            },
            ErrorCode::NotEntitled => match parsed_detail(&err, "id") {
                Some(member_id) => EntitlementError::NotEntitled(member_id),
                None => rejected(err),
            },
            ErrorCode::InvalidStateTransition => match (detail("current"), detail("attempted")) {
                (Some(current), Some(attempted)) => {
                    EntitlementError::InvalidState { current, attempted }
                }
                _ => rejected(err),
            },
        }
    }
}

fn parsed_detail<T: FromStr>(err: &DomainError, key: &str) -> Option<T> {
    err.details.get(key).and_then(|v| v.parse().ok())
}

impl From<ValidationError> for EntitlementError {
    fn from(err: ValidationError) -> Self {
        EntitlementError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<EntitlementError> for DomainError {
    fn from(err: EntitlementError) -> Self {
        let base = DomainError::new(err.code(), err.message());
        match err {
            EntitlementError::ContributionNotFound(id) => base.with_detail("id", id.to_string()),
            EntitlementError::NoContributionForMember(member_id) => {
                base.with_detail("member_id", member_id.to_string())
            }
            EntitlementError::MemberNotFound(id) | EntitlementError::NotEntitled(id) => {
                base.with_detail("id", id.to_string())
            }
            EntitlementError::ClaimNotFound(id) => base.with_detail("id", id.to_string()),
            EntitlementError::MemberAlreadyExists(national_id) => {
                base.with_detail("national_id", national_id)
            }
            EntitlementError::InvalidDecision(raw) => base.with_detail("value", raw),
            EntitlementError::ModificationLocked {
                contribution_id,
                period_start,
                unlocks_on,
            } => base
                .with_detail("id", contribution_id.to_string())
                .with_detail("period_start", period_start.to_string())
                .with_detail("unlocks_on", unlocks_on.to_string()),
            EntitlementError::InvalidState { current, attempted } => base
                .with_detail("current", current)
                .with_detail("attempted", attempted),
            EntitlementError::ValidationFailed { field, message } => {
                DomainError::validation(field, message)
            }
            EntitlementError::Rejected { code, message } => DomainError::new(code, message),
            EntitlementError::Conflict(message) => DomainError::conflict(message),
            EntitlementError::RepositoryUnavailable(message) => DomainError::database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn modification_locked_creates_correctly() {
        let id = ContributionId::new();
        let err = EntitlementError::modification_locked(id, date(2024, 1, 10), date(2024, 2, 10));
        assert!(matches!(
            err,
            EntitlementError::ModificationLocked { contribution_id, unlocks_on, .. }
            if contribution_id == id && unlocks_on == date(2024, 2, 10)
        ));
        assert_eq!(err.code(), ErrorCode::ModificationLocked);
    }

    #[test]
    fn not_entitled_creates_correctly() {
        let member_id = MemberId::new();
        let err = EntitlementError::not_entitled(member_id);
        assert!(matches!(err, EntitlementError::NotEntitled(m) if m == member_id));
        assert_eq!(err.code(), ErrorCode::NotEntitled);
    }

    #[test]
    fn no_contribution_for_member_shares_not_found_code() {
        let err = EntitlementError::no_contribution_for_member(MemberId::new());
        assert_eq!(err.code(), ErrorCode::ContributionNotFound);
    }

    #[test]
    fn repository_unavailable_maps_to_database_code() {
        let err = EntitlementError::repository_unavailable("connection refused");
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    // ============================================================
    // Message Tests
    // ============================================================

    #[test]
    fn locked_message_includes_unlock_date() {
        let err = EntitlementError::modification_locked(
            ContributionId::new(),
            date(2024, 1, 10),
            date(2024, 2, 10),
        );
        let msg = err.message();
        assert!(msg.contains("one month"));
        assert!(msg.contains("2024-02-10"));
    }

    #[test]
    fn invalid_decision_message_includes_value() {
        let err = EntitlementError::invalid_decision("peut-etre");
        assert!(err.to_string().contains("peut-etre"));
    }

    // ============================================================
    // Retryable Tests
    // ============================================================

    #[test]
    fn conflict_and_unavailable_are_retryable() {
        assert!(EntitlementError::conflict("version moved").is_retryable());
        assert!(EntitlementError::repository_unavailable("down").is_retryable());
    }

    #[test]
    fn business_rejections_are_not_retryable() {
        assert!(!EntitlementError::not_entitled(MemberId::new()).is_retryable());
        assert!(!EntitlementError::invalid_decision("x").is_retryable());
        assert!(!EntitlementError::modification_locked(
            ContributionId::new(),
            date(2024, 1, 1),
            date(2024, 2, 1)
        )
        .is_retryable());
    }

    // ============================================================
    // Conversion Tests
    // ============================================================

    #[test]
    fn concurrency_conflict_converts_to_conflict() {
        let err: EntitlementError = DomainError::conflict("stale version").into();
        assert!(matches!(err, EntitlementError::Conflict(ref m) if m == "stale version"));
    }

    #[test]
    fn database_error_converts_to_repository_unavailable() {
        let err: EntitlementError = DomainError::database("pool timed out").into();
        assert!(matches!(err, EntitlementError::RepositoryUnavailable(_)));
        let err: EntitlementError = DomainError::new(ErrorCode::Timeout, "slow").into();
        assert!(matches!(err, EntitlementError::RepositoryUnavailable(_)));
    }

    #[test]
    fn not_found_with_id_detail_converts_to_typed_variant() {
        let id = ContributionId::new();
        let err: EntitlementError = DomainError::new(ErrorCode::ContributionNotFound, "gone")
            .with_detail("id", id.to_string())
            .into();
        assert_eq!(err, EntitlementError::ContributionNotFound(id));
    }

    #[test]
    fn validation_keeps_field_name() {
        let err: EntitlementError = DomainError::validation("amount", "must be positive").into();
        assert!(matches!(
            err,
            EntitlementError::ValidationFailed { ref field, .. } if field == "amount"
        ));
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: EntitlementError = ValidationError::empty_field("receipt_number").into();
        assert!(matches!(
            err,
            EntitlementError::ValidationFailed { ref field, .. } if field == "receipt_number"
        ));
    }

    #[test]
    fn converts_back_to_domain_error_with_code() {
        let err: DomainError = EntitlementError::not_entitled(MemberId::new()).into();
        assert_eq!(err.code, ErrorCode::NotEntitled);
    }

    #[test]
    fn round_trip_through_domain_error_preserves_every_variant() {
        let errors = vec![
            EntitlementError::contribution_not_found(ContributionId::new()),
            EntitlementError::no_contribution_for_member(MemberId::new()),
            EntitlementError::member_not_found(MemberId::new()),
            EntitlementError::member_already_exists("AB123456"),
            EntitlementError::claim_not_found(ClaimId::new()),
            EntitlementError::invalid_decision("peut-etre"),
            EntitlementError::modification_locked(
                ContributionId::new(),
                date(2024, 1, 10),
                date(2024, 2, 10),
            ),
            EntitlementError::not_entitled(MemberId::new()),
            EntitlementError::invalid_state("received", "received"),
            EntitlementError::validation("amount_cents", "amount must be positive"),
            EntitlementError::Rejected {
                code: ErrorCode::NotEntitled,
                message: "refused".to_string(),
            },
            EntitlementError::conflict("version moved"),
            EntitlementError::repository_unavailable("connection refused"),
        ];

        for original in errors {
            let back = EntitlementError::from(DomainError::from(original.clone()));
            assert_eq!(back, original);
            assert_eq!(back.is_retryable(), original.is_retryable());
        }
    }

    #[test]
    fn business_codes_without_details_are_not_retryable() {
        for code in [
            ErrorCode::ModificationLocked,
            ErrorCode::NotEntitled,
            ErrorCode::InvalidStateTransition,
            ErrorCode::MemberNotFound,
            ErrorCode::ContributionNotFound,
            ErrorCode::ClaimNotFound,
        ] {
            let err = EntitlementError::from(DomainError::new(code, "x"));
            assert_eq!(err.code(), code);
            assert!(!err.is_retryable(), "{} became retryable", code);
        }
    }

    #[test]
    fn only_infrastructure_codes_become_repository_unavailable() {
        for code in [ErrorCode::DatabaseError, ErrorCode::Timeout, ErrorCode::InternalError] {
            let err = EntitlementError::from(DomainError::new(code, "x"));
            assert!(matches!(err, EntitlementError::RepositoryUnavailable(_)));
        }
    }
}
