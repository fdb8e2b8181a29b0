//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a registered member (adherent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Creates a new random MemberId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MemberId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a contribution (cotisation) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionId(Uuid);

impl ContributionId {
    /// Creates a new random ContributionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ContributionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContributionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContributionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a healthcare claim (dossier de soin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(Uuid);

impl ClaimId {
    /// Creates a new random ClaimId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ClaimId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Internal member number, a zero-padded six digit string ("000042").
///
/// Allocated from a monotonically increasing sequence at registration and
/// unique across all members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberNumber(String);

impl MemberNumber {
    /// Number of digits in a member number.
    pub const WIDTH: usize = 6;

    /// Largest sequence value that still fits in [`Self::WIDTH`] digits.
    pub const MAX_SEQUENCE: u32 = 999_999;

    /// Builds a member number from its sequence value.
    pub fn from_sequence(sequence: u32) -> Result<Self, ValidationError> {
        if sequence == 0 || sequence > Self::MAX_SEQUENCE {
            return Err(ValidationError::out_of_range(
                "member_number",
                1,
                Self::MAX_SEQUENCE as i32,
                i32::try_from(sequence).unwrap_or(i32::MAX),
            ));
        }
        Ok(Self(format!("{:0width$}", sequence, width = Self::WIDTH)))
    }

    /// Parses a member number, accepting unpadded input ("42" -> "000042").
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("member_number"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) || trimmed.len() > Self::WIDTH {
            return Err(ValidationError::invalid_format(
                "member_number",
                "expected up to six digits",
            ));
        }
        let sequence: u32 = trimmed
            .parse()
            .map_err(|_| ValidationError::invalid_format("member_number", "not a number"))?;
        Self::from_sequence(sequence)
    }

    /// Returns the sequence value this number was built from.
    pub fn sequence(&self) -> u32 {
        self.0.parse().unwrap_or_default()
    }

    /// Returns the padded string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MemberNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MemberNumber> for String {
    fn from(value: MemberNumber) -> Self {
        value.0
    }
}

/// National identity card number (CIN). Unique per member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Maximum length of a national ID.
    pub const MAX_LEN: usize = 10;

    /// Creates a NationalId, normalising to upper case.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let value = raw.trim().to_uppercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("national_id"));
        }
        if value.len() > Self::MAX_LEN {
            return Err(ValidationError::invalid_format(
                "national_id",
                format!("must be at most {} characters", Self::MAX_LEN),
            ));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "national_id",
                "must be alphanumeric",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match, used by list filters.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.0.contains(&needle.trim().to_uppercase())
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NationalId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_ids_are_unique() {
        assert_ne!(MemberId::new(), MemberId::new());
    }

    #[test]
    fn contribution_id_parses_from_display() {
        let id = ContributionId::new();
        let parsed: ContributionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn claim_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ClaimId>().is_err());
    }

    #[test]
    fn member_number_is_zero_padded() {
        let number = MemberNumber::from_sequence(42).unwrap();
        assert_eq!(number.as_str(), "000042");
        assert_eq!(number.sequence(), 42);
    }

    #[test]
    fn member_number_rejects_zero_and_overflow() {
        assert!(MemberNumber::from_sequence(0).is_err());
        assert!(MemberNumber::from_sequence(1_000_000).is_err());
    }

    #[test]
    fn member_number_overflow_reports_non_negative_actual() {
        let err = MemberNumber::from_sequence(u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { actual, .. } if actual == i32::MAX
        ));
    }

    #[test]
    fn member_number_parse_accepts_unpadded_input() {
        assert_eq!(MemberNumber::parse("7").unwrap().as_str(), "000007");
        assert_eq!(MemberNumber::parse(" 000123 ").unwrap().as_str(), "000123");
    }

    #[test]
    fn member_number_parse_rejects_non_digits() {
        assert!(MemberNumber::parse("12a").is_err());
        assert!(MemberNumber::parse("").is_err());
        assert!(MemberNumber::parse("1234567").is_err());
    }

    #[test]
    fn member_number_serializes_as_string() {
        let number = MemberNumber::from_sequence(5).unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), r#""000005""#);
    }

    #[test]
    fn national_id_is_normalised_to_upper_case() {
        let id = NationalId::new(" ab12345 ").unwrap();
        assert_eq!(id.as_str(), "AB12345");
    }

    #[test]
    fn national_id_rejects_empty_and_long_values() {
        assert!(NationalId::new("  ").is_err());
        assert!(NationalId::new("ABCDEFGHIJK").is_err());
        assert!(NationalId::new("AB-123").is_err());
    }

    #[test]
    fn national_id_substring_match_ignores_case() {
        let id = NationalId::new("BK778899").unwrap();
        assert!(id.contains_ignore_case("k77"));
        assert!(!id.contains_ignore_case("zz"));
    }

    #[test]
    fn national_id_deserialization_validates() {
        let err = serde_json::from_str::<NationalId>(r#""""#);
        assert!(err.is_err());
    }
}
