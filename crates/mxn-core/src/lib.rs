//! # mxn-core: Member X.500 Names
//!
//! The distinguished name every network participant is known by. A name is
//! parsed once, validated against a fixed set of field rules, and from then
//! on is an immutable value with one canonical string form and one DER
//! principal form.
//!
//! ## Key Design Principles
//!
//! 1. **Validated construction only.** [`DistinguishedName`] has no public
//!    fields and no unchecked constructor. If you hold one, it passed every
//!    rule.
//!
//! 2. **Identity is the six fields.** Two names with the same CN, OU, O, L,
//!    ST and C are equal and hash equal, however their input strings were
//!    ordered, spaced or escaped.
//!
//! 3. **One canonical rendering.** `CN, OU, O, L, ST, C` order, absent
//!    attributes omitted, values escaped so that parsing the output yields
//!    an equal name.
//!
//! 4. **Collaborators are injected.** The country-code set and the
//!    organisation content policy live in [`NameRules`]; there is no global
//!    mutable table.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Library code logs through `tracing` and never installs a subscriber.

#![deny(missing_docs)]

pub mod attribute;
pub mod country;
pub mod error;
mod mapper;
pub mod name;
pub mod policy;
mod principal;
pub mod rdn;
pub mod render;
pub mod rules;

// Re-export primary types for ergonomic imports.
pub use attribute::AttributeTag;
pub use country::{CountryCodes, UNSPECIFIED_COUNTRY};
pub use error::{NameError, OrganisationError};
pub use name::DistinguishedName;
pub use policy::{LegalNameValidator, OrganisationValidator, PermissiveValidator};
pub use rdn::{decompose, Rdn};
pub use render::{escape_value, is_printable_string_char};
pub use rules::{NameRules, OrganisationPolicy, RulesConfig, RulesConfigError};
