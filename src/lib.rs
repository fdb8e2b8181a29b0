//! Mutuelle Entitlement - Entitlement lifecycle engine for a mutual
//! health-insurance scheme.
//!
//! A member's contribution decision determines whether they may file
//! reimbursement claims. This crate derives that entitlement, enforces the
//! 30-day modification lock on contribution decisions, commits contribution
//! and entitlement changes atomically, and gates claim creation on the
//! member's live entitlement.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
