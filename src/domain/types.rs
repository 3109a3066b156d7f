//! Strongly-typed value objects used by domain records.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, validated
//! email, bounded percentages, closed categorical sets) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Numeric value outside of its allowed range.
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// String is not a member of the closed categorical set.
    #[error("unknown value: {0}")]
    UnknownValue(String),
}

/// A closed set of string literals (status, type, ...).
///
/// Every categorical field of a record is one of these; parsing rejects any
/// value outside of the declared set.
pub trait Categorical:
    Copy
    + Eq
    + Hash
    + Debug
    + Display
    + FromStr<Err = TypeConstraintError>
    + Send
    + Sync
    + 'static
{
    /// Every member in display order.
    const ALL: &'static [Self];

    /// The literal this member serializes to.
    fn as_str(&self) -> &'static str;
}

/// Declares a [`Categorical`] enum serialized as its exact string literals.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $crate::domain::types::Categorical for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::types::Categorical::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::types::TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err($crate::domain::types::TypeConstraintError::UnknownValue(
                        other.to_string(),
                    )),
                }
            }
        }
    };
}

pub(crate) use categorical;

/// Placeholder categorical set for records that have no second filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Uncategorized {}

impl Categorical for Uncategorized {
    const ALL: &'static [Self] = &[];

    fn as_str(&self) -> &'static str {
        match *self {}
    }
}

impl Display for Uncategorized {
    fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl FromStr for Uncategorized {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Err(TypeConstraintError::UnknownValue(s.to_string()))
    }
}

/// Stable, non-empty record identifier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Trims whitespace and rejects empty identifiers.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Fabricates a random identifier, optionally prefixed (`call-1a2b3c`).
    pub fn generate(prefix: Option<&str>, len: usize) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        let suffix: String = random.chars().take(len.clamp(1, 32)).collect();
        match prefix {
            Some(prefix) => Self(format!("{prefix}-{suffix}")),
            None => Self(suffix),
        }
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RecordId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Whole-number percentage in `0..=100`.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange(format!("{value}%")))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Percent {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

/// Sanitized optional free text; blank input collapses to `None`.
pub fn clean_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| ammonia::clean(text.trim()))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    categorical!(
        /// Test-only closed set.
        Color { Red => "Red", DarkBlue => "Dark Blue" }
    );

    #[test]
    fn record_id_trims_and_rejects_blank() {
        assert_eq!(RecordId::new("  call-001 ").unwrap().as_str(), "call-001");
        assert_eq!(RecordId::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn generated_ids_carry_prefix_and_length() {
        let id = RecordId::generate(Some("call"), 6);
        assert!(id.starts_with("call-"));
        assert_eq!(id.len(), "call-".len() + 6);
        assert_ne!(id, RecordId::generate(Some("call"), 6));
    }

    #[test]
    fn categorical_round_trips_exact_literals() {
        assert_eq!("Dark Blue".parse::<Color>(), Ok(Color::DarkBlue));
        assert_eq!(Color::DarkBlue.to_string(), "Dark Blue");
        assert_eq!(
            "dark blue".parse::<Color>(),
            Err(TypeConstraintError::UnknownValue("dark blue".into()))
        );
        assert_eq!(Color::ALL, &[Color::Red, Color::DarkBlue]);
        assert_eq!(
            serde_json::to_string(&Color::DarkBlue).unwrap(),
            "\"Dark Blue\""
        );
    }

    #[test]
    fn percent_is_bounded() {
        assert!(Percent::new(100).is_ok());
        assert!(Percent::new(101).is_err());
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new(" Emma.Johnson@Example.com ").unwrap();
        assert_eq!(email.as_str(), "emma.johnson@example.com");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn optional_text_is_sanitized() {
        assert_eq!(clean_optional_text(Some("   ".into())), None);
        assert_eq!(
            clean_optional_text(Some("hi <script>x</script>".into())),
            Some("hi ".into())
        );
    }
}
