//! # Error Hierarchy
//!
//! Structured errors for member name handling, built with `thiserror`.
//!
//! Every variant is a permanent input rejection: retrying the same input
//! yields the same error. Variants carry the attribute tag or offending
//! value so callers can tell the user exactly what to correct.

use thiserror::Error;

use crate::attribute::AttributeTag;

/// Reasons a distinguished name is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The text (or DER) does not have a valid single-valued RDN structure.
    #[error("malformed distinguished name: {reason}")]
    Malformed {
        /// What was wrong with the structure.
        reason: String,
    },

    /// A mandatory attribute (O, L or C) is absent.
    #[error("missing mandatory attribute {0}")]
    MissingAttribute(AttributeTag),

    /// The same attribute appears more than once.
    #[error("duplicate attribute {0}")]
    DuplicateAttribute(AttributeTag),

    /// The attribute type is not one of CN, OU, O, L, ST, C.
    #[error("unsupported attribute type \"{0}\" (expected one of CN, OU, O, L, ST, C)")]
    UnsupportedAttribute(String),

    /// The value is at or above the attribute's exclusive length bound.
    #[error("attribute {tag} must contain fewer than {max} characters")]
    LengthViolation {
        /// The offending attribute.
        tag: AttributeTag,
        /// Exclusive upper bound on the value length.
        max: usize,
    },

    /// An optional attribute is present but blank.
    #[error("attribute {0} must not be blank when present")]
    BlankAttribute(AttributeTag),

    /// The organisation content policy rejected the O value.
    #[error("invalid organisation: {0}")]
    InvalidOrganisation(#[from] OrganisationError),

    /// The C value is neither an ISO 3166-1 alpha-2 code nor `ZZ`.
    #[error("invalid country code \"{0}\"")]
    InvalidCountryCode(String),

    /// DER encoding or decoding of the principal form failed.
    #[error("principal encoding error: {0}")]
    Encoding(String),
}

impl NameError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<der::Error> for NameError {
    fn from(err: der::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Failure reported by an organisation content policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrganisationError {
    /// Fewer than two letters in the name.
    #[error("organisation must contain at least two letters")]
    TooFewLetters,

    /// A control character (including NUL) appears in the name.
    #[error("organisation must not contain control characters (found U+{0:04X})")]
    ControlCharacter(u32),

    /// The name starts or ends with whitespace.
    #[error("organisation must not have leading or trailing whitespace")]
    SurroundingWhitespace,

    /// Two consecutive spaces appear in the name.
    #[error("organisation must not contain double spaces")]
    DoubleSpacing,

    /// A letter from a script other than Latin.
    #[error("organisation must only use Latin letters (found {0:?})")]
    NonLatinLetter(char),

    /// Rejection by a custom policy.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_carries_reason() {
        let err = NameError::malformed("unbalanced quotes");
        let msg = format!("{err}");
        assert!(msg.contains("malformed"));
        assert!(msg.contains("unbalanced quotes"));
    }

    #[test]
    fn tag_variants_display_keyword() {
        assert!(format!("{}", NameError::MissingAttribute(AttributeTag::Locality)).contains('L'));
        assert!(format!("{}", NameError::DuplicateAttribute(AttributeTag::Organisation))
            .contains("duplicate attribute O"));
        assert!(format!("{}", NameError::BlankAttribute(AttributeTag::State)).contains("ST"));
    }

    #[test]
    fn length_violation_display() {
        let err = NameError::LengthViolation {
            tag: AttributeTag::Organisation,
            max: 128,
        };
        let msg = format!("{err}");
        assert!(msg.contains('O'));
        assert!(msg.contains("128"));
    }

    #[test]
    fn unsupported_and_country_carry_input() {
        assert!(format!("{}", NameError::UnsupportedAttribute("SN".into())).contains("\"SN\""));
        assert!(format!("{}", NameError::InvalidCountryCode("XX".into())).contains("\"XX\""));
    }

    #[test]
    fn organisation_error_converts_unchanged() {
        let err: NameError = OrganisationError::DoubleSpacing.into();
        assert_eq!(
            err,
            NameError::InvalidOrganisation(OrganisationError::DoubleSpacing)
        );
        assert!(format!("{err}").contains("double spaces"));
    }

    #[test]
    fn control_character_display_is_hex() {
        let msg = format!("{}", OrganisationError::ControlCharacter(0));
        assert!(msg.contains("U+0000"));
    }
}
