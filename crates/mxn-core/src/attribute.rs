//! # Attribute Tags
//!
//! The six attribute types a member name may carry (RFC 4519 definitions),
//! their keyword and OID spellings, and their per-field constraints.

use const_oid::ObjectIdentifier;

/// Exclusive upper bound on the organisation (O) length.
pub const MAX_LENGTH_ORGANISATION: usize = 128;
/// Exclusive upper bound on the locality (L) length.
pub const MAX_LENGTH_LOCALITY: usize = 64;
/// Exclusive upper bound on the state (ST) length.
pub const MAX_LENGTH_STATE: usize = 64;
/// Exclusive upper bound on the organisation unit (OU) length.
pub const MAX_LENGTH_ORGANISATION_UNIT: usize = 64;
/// Exclusive upper bound on the common name (CN) length.
pub const MAX_LENGTH_COMMON_NAME: usize = 64;

const OID_COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const OID_COUNTRY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
const OID_LOCALITY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
const OID_STATE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
const OID_ORGANISATION: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
const OID_ORGANISATION_UNIT: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// A supported attribute type.
///
/// Variants are declared most-specific first, which is the order of the
/// canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeTag {
    /// `CN`, optional.
    CommonName,
    /// `OU`, optional.
    OrganisationUnit,
    /// `O`, mandatory.
    Organisation,
    /// `L`, mandatory.
    Locality,
    /// `ST`, optional, non-blank when present.
    State,
    /// `C`, mandatory.
    Country,
}

impl AttributeTag {
    /// All tags in canonical (most-specific-first) order.
    pub fn all() -> &'static [AttributeTag] {
        &[
            Self::CommonName,
            Self::OrganisationUnit,
            Self::Organisation,
            Self::Locality,
            Self::State,
            Self::Country,
        ]
    }

    /// The keyword used in the string form.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::CommonName => "CN",
            Self::OrganisationUnit => "OU",
            Self::Organisation => "O",
            Self::Locality => "L",
            Self::State => "ST",
            Self::Country => "C",
        }
    }

    /// The X.520 object identifier of the attribute type.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Self::CommonName => OID_COMMON_NAME,
            Self::OrganisationUnit => OID_ORGANISATION_UNIT,
            Self::Organisation => OID_ORGANISATION,
            Self::Locality => OID_LOCALITY,
            Self::State => OID_STATE,
            Self::Country => OID_COUNTRY,
        }
    }

    /// Resolve an OID to a tag.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        Self::all().iter().copied().find(|tag| tag.oid() == *oid)
    }

    /// Resolve an attribute-type token: a keyword (case-insensitive) or a
    /// dotted OID, optionally prefixed with `OID.`.
    pub fn from_token(token: &str) -> Option<Self> {
        let dotted = strip_oid_prefix(token);
        if dotted.starts_with(|c: char| c.is_ascii_digit()) {
            let oid = ObjectIdentifier::new(dotted).ok()?;
            return Self::from_oid(&oid);
        }
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.keyword().eq_ignore_ascii_case(token))
    }

    /// Exclusive upper bound on the value length, in characters.
    ///
    /// The country code has no length bound of its own; it is checked
    /// against the country-code set instead.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::CommonName => Some(MAX_LENGTH_COMMON_NAME),
            Self::OrganisationUnit => Some(MAX_LENGTH_ORGANISATION_UNIT),
            Self::Organisation => Some(MAX_LENGTH_ORGANISATION),
            Self::Locality => Some(MAX_LENGTH_LOCALITY),
            Self::State => Some(MAX_LENGTH_STATE),
            Self::Country => None,
        }
    }

    /// Whether a name must carry this attribute.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::Organisation | Self::Locality | Self::Country)
    }
}

impl std::fmt::Display for AttributeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

pub(crate) fn strip_oid_prefix(token: &str) -> &str {
    match token.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("OID.") => &token[4..],
        _ => token,
    }
}
