//! Demographic and affiliation value types for members.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Member's sex as recorded at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(ValidationError::invalid_format(
                "sex",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

/// Employment status of the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    Retired,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "active",
            EmploymentStatus::Retired => "retired",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "active" => Ok(EmploymentStatus::Active),
            "retired" => Ok(EmploymentStatus::Retired),
            other => Err(ValidationError::invalid_format(
                "employment_status",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

/// Employer organisation, also used as the contribution section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organization {
    Anp,
    MarsaMaroc,
    Modep,
}

impl Organization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Organization::Anp => "anp",
            Organization::MarsaMaroc => "marsa_maroc",
            Organization::Modep => "modep",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Organization::Anp => "ANP",
            Organization::MarsaMaroc => "Marsa Maroc",
            Organization::Modep => "MODEP",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "anp" => Ok(Organization::Anp),
            "marsa_maroc" => Ok(Organization::MarsaMaroc),
            "modep" => Ok(Organization::Modep),
            other => Err(ValidationError::invalid_format(
                "organization",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Bank account identifier (RIB): exactly 24 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BankAccount(String);

impl BankAccount {
    pub const LEN: usize = 24;

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let value: String = raw.into().chars().filter(|c| !c.is_whitespace()).collect();
        if value.is_empty() {
            return Err(ValidationError::empty_field("bank_account"));
        }
        if value.len() != Self::LEN || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "bank_account",
                format!("expected {} digits", Self::LEN),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BankAccount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BankAccount::new(value)
    }
}

impl From<BankAccount> for String {
    fn from(value: BankAccount) -> Self {
        value.0
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact phone number, at most 15 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const MAX_LEN: usize = 15;

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let value = raw.into().trim().to_string();
        if value.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(ValidationError::invalid_format(
                "phone",
                format!("at most {} characters", Self::MAX_LEN),
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'))
        {
            return Err(ValidationError::invalid_format(
                "phone",
                "only digits, spaces, '+' and '-' are allowed",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PhoneNumber::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}
