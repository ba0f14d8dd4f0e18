//! # Organisation Content Policy
//!
//! The organisation (`O`) attribute is the legal name of a participant and
//! is held to a content policy that the other attributes are not. The policy
//! is a swappable strategy: parsing and rendering only depend on the
//! [`OrganisationValidator`] pass/fail contract.

use crate::error::OrganisationError;

/// Content policy applied to the organisation attribute.
pub trait OrganisationValidator: Send + Sync + std::fmt::Debug {
    /// Accept or reject an organisation value.
    ///
    /// # Errors
    ///
    /// Returns an [`OrganisationError`] describing the first rule violated.
    fn validate_organisation(&self, value: &str) -> Result<(), OrganisationError>;
}

/// Legal-name policy for organisation values.
///
/// Rejects, in this order:
/// - control characters (including NUL)
/// - leading or trailing whitespace
/// - two consecutive spaces
/// - letters outside the Latin script
/// - fewer than two letters
///
/// Digits, punctuation and symbols (`$`, `'`, `=`, `&`, ...) are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalNameValidator;

impl OrganisationValidator for LegalNameValidator {
    fn validate_organisation(&self, value: &str) -> Result<(), OrganisationError> {
        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(OrganisationError::ControlCharacter(c as u32));
        }
        if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
            return Err(OrganisationError::SurroundingWhitespace);
        }
        if value.contains("  ") {
            return Err(OrganisationError::DoubleSpacing);
        }
        if let Some(c) = value
            .chars()
            .find(|c| c.is_alphabetic() && !is_latin_letter(*c))
        {
            return Err(OrganisationError::NonLatinLetter(c));
        }
        if value.chars().filter(|c| c.is_alphabetic()).count() < 2 {
            return Err(OrganisationError::TooFewLetters);
        }
        Ok(())
    }
}

/// Accepts every organisation value.
///
/// For deployments where the legal name is vetted elsewhere (for example
/// by an onboarding registry) before a name is ever constructed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveValidator;

impl OrganisationValidator for PermissiveValidator {
    fn validate_organisation(&self, _value: &str) -> Result<(), OrganisationError> {
        Ok(())
    }
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c,
            '\u{00AA}' | '\u{00BA}'
            | '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{02AF}'
            | '\u{1D00}'..='\u{1D7F}'
            | '\u{1E00}'..='\u{1EFF}'
            | '\u{2C60}'..='\u{2C7F}'
            | '\u{A720}'..='\u{A7FF}'
            | '\u{AB30}'..='\u{AB6F}'
            | '\u{FF21}'..='\u{FF3A}'
            | '\u{FF41}'..='\u{FF5A}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: &str) -> Result<(), OrganisationError> {
        LegalNameValidator.validate_organisation(value)
    }

    #[test]
    fn accepts_ordinary_names() {
        assert!(check("Bank A").is_ok());
        assert!(check("bank A").is_ok());
        assert!(check("8Bank A").is_ok());
        assert!(check("VA$LID").is_ok());
        assert!(check("VA'LID").is_ok());
        assert!(check("IN=VALID").is_ok());
        assert!(check("Bank, A").is_ok());
    }

    #[test]
    fn accepts_accented_latin() {
        assert!(check("Société Générale").is_ok());
        assert!(check("Łódź Bank").is_ok());
        assert!(check("Straße AG").is_ok());
    }

    #[test]
    fn rejects_non_latin_letters() {
        assert_eq!(
            check("B\u{0F5C}a"),
            Err(OrganisationError::NonLatinLetter('\u{0F5C}'))
        );
        assert!(matches!(
            check("Банк"),
            Err(OrganisationError::NonLatinLetter(_))
        ));
    }

    #[test]
    fn requires_two_letters() {
        assert_eq!(check("B"), Err(OrganisationError::TooFewLetters));
        assert_eq!(check(""), Err(OrganisationError::TooFewLetters));
        assert_eq!(check("A1"), Err(OrganisationError::TooFewLetters));
        assert!(check("AB").is_ok());
    }

    #[test]
    fn rejects_double_spacing() {
        assert_eq!(check("IN  VALID"), Err(OrganisationError::DoubleSpacing));
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            check("IN\u{0}VALID"),
            Err(OrganisationError::ControlCharacter(0))
        );
        assert_eq!(
            check("IN\tVALID"),
            Err(OrganisationError::ControlCharacter(9))
        );
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert_eq!(check(" VALID"), Err(OrganisationError::SurroundingWhitespace));
        assert_eq!(check("VALID "), Err(OrganisationError::SurroundingWhitespace));
    }

    #[test]
    fn permissive_accepts_everything() {
        assert!(PermissiveValidator.validate_organisation("").is_ok());
        assert!(PermissiveValidator.validate_organisation("B\u{0F5C}a").is_ok());
    }
}
