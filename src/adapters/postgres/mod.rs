//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMemberRepository` - Member registration (member + contribution in one transaction)
//! - `PostgresContributionRepository` - Versioned contribution + entitlement commit
//! - `PostgresContributionReader` - Joined contribution search
//! - `PostgresClaimRepository` - Claim persistence
//! - `PostgresMemberReader` - Member list filters
//! - `PostgresClaimReader` - Joined claim search
//!
//! All adapters share one `PgPool`, so eligibility reads see every
//! committed entitlement change (read-committed).

mod claim_reader;
mod claim_repository;
mod contribution_reader;
mod contribution_repository;
mod member_reader;
mod member_repository;
mod pool;

pub use claim_reader::PostgresClaimReader;
pub use claim_repository::PostgresClaimRepository;
pub use contribution_reader::PostgresContributionReader;
pub use contribution_repository::PostgresContributionRepository;
pub use member_reader::PostgresMemberReader;
pub use member_repository::PostgresMemberRepository;
pub use pool::{connect, run_migrations};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Maps a driver error to a domain error. Pool exhaustion is a timeout,
/// everything else a database failure.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::PoolTimedOut => {
            DomainError::new(ErrorCode::Timeout, format!("{}: connection pool timed out", context))
        }
        other => DomainError::database(format!("{}: {}", context, other)),
    }
}

/// A stored row failed domain validation.
pub(crate) fn corrupt_row(table: &str, err: ValidationError) -> DomainError {
    DomainError::database(format!("Invalid {} row: {}", table, err))
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.constraint() == Some(constraint))
}

/// Escapes LIKE wildcards so the needle matches literally, then wraps it
/// for a substring match.
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
