//! # Validation Rules
//!
//! [`NameRules`] bundles the collaborators a name is validated against: the
//! country-code set and the organisation content policy. Both are immutable
//! once built and cheap to share between threads.
//!
//! [`RulesConfig`] is the declarative form loaded from configuration files.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::country::CountryCodes;
use crate::policy::{LegalNameValidator, OrganisationValidator, PermissiveValidator};

/// Collaborators used to validate name fields.
#[derive(Debug, Clone)]
pub struct NameRules {
    countries: Arc<CountryCodes>,
    organisation: Arc<dyn OrganisationValidator>,
}

impl NameRules {
    /// Build rules from an explicit country set and organisation policy.
    pub fn new(countries: CountryCodes, organisation: Arc<dyn OrganisationValidator>) -> Self {
        Self {
            countries: Arc::new(countries),
            organisation,
        }
    }

    /// Replace the organisation policy, keeping the country set.
    pub fn with_organisation_validator(mut self, validator: Arc<dyn OrganisationValidator>) -> Self {
        self.organisation = validator;
        self
    }

    /// Replace the country set, keeping the organisation policy.
    pub fn with_country_codes(mut self, countries: CountryCodes) -> Self {
        self.countries = Arc::new(countries);
        self
    }

    /// The accepted country codes.
    pub fn countries(&self) -> &CountryCodes {
        &self.countries
    }

    /// The organisation content policy.
    pub fn organisation_validator(&self) -> &dyn OrganisationValidator {
        self.organisation.as_ref()
    }
}

impl Default for NameRules {
    /// ISO 3166-1 codes plus `ZZ`, and the [`LegalNameValidator`].
    fn default() -> Self {
        Self::new(CountryCodes::iso3166(), Arc::new(LegalNameValidator))
    }
}

/// Which built-in organisation policy to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganisationPolicy {
    /// [`LegalNameValidator`].
    #[default]
    LegalName,
    /// [`PermissiveValidator`].
    Permissive,
}

/// Declarative rules configuration.
///
/// ```yaml
/// organisation_policy: legal_name
/// extra_country_codes: [XK]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Built-in organisation policy.
    #[serde(default)]
    pub organisation_policy: OrganisationPolicy,
    /// Codes accepted in addition to ISO 3166-1 and `ZZ`.
    #[serde(default)]
    pub extra_country_codes: Vec<String>,
}

/// Rejection of a [`RulesConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesConfigError {
    /// An extra country code is not two upper-case ASCII letters.
    #[error("extra country code \"{0}\" must be two upper-case ASCII letters")]
    InvalidExtraCountryCode(String),
}

impl RulesConfig {
    /// Validate the configuration and build the corresponding [`NameRules`].
    ///
    /// # Errors
    ///
    /// Returns [`RulesConfigError::InvalidExtraCountryCode`] for a code that
    /// is not exactly two upper-case ASCII letters.
    pub fn into_rules(self) -> Result<NameRules, RulesConfigError> {
        if let Some(bad) = self
            .extra_country_codes
            .iter()
            .find(|c| c.len() != 2 || !c.chars().all(|ch| ch.is_ascii_uppercase()))
        {
            return Err(RulesConfigError::InvalidExtraCountryCode(bad.clone()));
        }
        let validator: Arc<dyn OrganisationValidator> = match self.organisation_policy {
            OrganisationPolicy::LegalName => Arc::new(LegalNameValidator),
            OrganisationPolicy::Permissive => Arc::new(PermissiveValidator),
        };
        Ok(NameRules::new(
            CountryCodes::with_additional(self.extra_country_codes),
            validator,
        ))
    }
}
