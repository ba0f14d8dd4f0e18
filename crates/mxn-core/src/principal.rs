//! # Principal (DER) Form
//!
//! The X.501 `Name` encoding of a member name: an RDNSequence of
//! single-valued RDNs ordered least-significant first
//! (C, ST, L, O, OU, CN). The country is a PrintableString; every other
//! value is a UTF8String.

use der::asn1::SetOfVec;
use der::{Any, Decode, Encode, Tag, Tagged};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};

use crate::attribute::AttributeTag;
use crate::error::NameError;
use crate::name::DistinguishedName;
use crate::rdn::Rdn;

pub(crate) fn encode(dn: &DistinguishedName) -> Result<Vec<u8>, NameError> {
    let mut rdns = Vec::with_capacity(AttributeTag::all().len());
    for (tag, value) in dn.rdn_sequence() {
        let string_tag = match tag {
            AttributeTag::Country => Tag::PrintableString,
            _ => Tag::Utf8String,
        };
        let mut set = SetOfVec::new();
        set.insert(AttributeTypeAndValue {
            oid: tag.oid(),
            value: Any::new(string_tag, value.as_bytes())?,
        })?;
        rdns.push(RelativeDistinguishedName::from(set));
    }
    Ok(RdnSequence(rdns).to_der()?)
}

/// Decode a DER `Name` into RDNs keyed by dotted OID.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<Rdn>, NameError> {
    let name = RdnSequence::from_der(bytes)?;
    name.0
        .iter()
        .map(|rdn| {
            let mut pairs = rdn.0.iter();
            match (pairs.next(), pairs.next()) {
                (Some(pair), None) => Ok(Rdn {
                    attribute_type: pair.oid.to_string(),
                    value: decode_string(&pair.value)?,
                }),
                (None, _) => Err(NameError::malformed("empty RDN")),
                (Some(_), Some(_)) => Err(NameError::malformed(
                    "multi-valued RDNs are not supported",
                )),
            }
        })
        .collect()
}

/// Extract the text of a directory string value.
pub(crate) fn decode_string(value: &Any) -> Result<String, NameError> {
    match value.tag() {
        Tag::Utf8String | Tag::PrintableString | Tag::Ia5String => {
            String::from_utf8(value.value().to_vec())
                .map_err(|_| NameError::malformed("attribute value is not valid UTF-8"))
        }
        other => Err(NameError::malformed(format!(
            "unsupported attribute value type {other}"
        ))),
    }
}
