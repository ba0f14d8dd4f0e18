//! # Attribute Mapping
//!
//! Maps decomposed RDNs onto the six name fields. Fields are identified by
//! tag, never by position: `O=a, L=b, C=US` and `C=US, O=a, L=b` map to the
//! same name.
//!
//! Structural problems (unsupported or duplicate tags) are reported in input
//! order before any missing mandatory attribute; field-level rules run last.

use std::collections::BTreeMap;

use crate::attribute::AttributeTag;
use crate::error::NameError;
use crate::name::DistinguishedName;
use crate::rdn::Rdn;
use crate::rules::NameRules;

pub(crate) fn map_attributes(
    rdns: Vec<Rdn>,
    rules: &NameRules,
) -> Result<DistinguishedName, NameError> {
    let mut fields: BTreeMap<AttributeTag, String> = BTreeMap::new();

    for rdn in rdns {
        let tag = AttributeTag::from_token(&rdn.attribute_type).ok_or_else(|| {
            tracing::debug!(attribute_type = %rdn.attribute_type, "unsupported attribute type");
            NameError::UnsupportedAttribute(rdn.attribute_type.clone())
        })?;
        if fields.contains_key(&tag) {
            tracing::debug!(%tag, "duplicate attribute");
            return Err(NameError::DuplicateAttribute(tag));
        }
        fields.insert(tag, rdn.value);
    }

    let mut required = |tag: AttributeTag| {
        fields
            .remove(&tag)
            .ok_or(NameError::MissingAttribute(tag))
    };
    let organisation = required(AttributeTag::Organisation)?;
    let locality = required(AttributeTag::Locality)?;
    let country = required(AttributeTag::Country)?;

    DistinguishedName::with_rules(
        fields.remove(&AttributeTag::CommonName),
        fields.remove(&AttributeTag::OrganisationUnit),
        organisation,
        locality,
        fields.remove(&AttributeTag::State),
        country,
        rules,
    )
}
