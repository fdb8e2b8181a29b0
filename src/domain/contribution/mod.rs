//! Contribution domain module.

mod aggregate;

pub use aggregate::Contribution;
