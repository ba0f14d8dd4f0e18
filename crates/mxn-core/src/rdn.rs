//! # RDN Decomposition
//!
//! Splits an LDAP-style distinguished name string into its ordered,
//! single-valued RDNs and unescapes each value.
//!
//! Decomposition runs in two passes:
//!
//! 1. A structural pass over the whole string that honours quoting and
//!    escaping, splits at unquoted `,`/`;`, and rejects what no valid name
//!    can contain: multi-valued RDNs (`+`), unescaped `<`/`>` outside quotes,
//!    unbalanced quotes and a dangling trailing `\`.
//! 2. A per-RDN pass that separates the attribute type from the value and
//!    decodes quoted, escaped, hex-escaped and `#`-hex (BER) values.
//!
//! Attribute types are only normalised here (keywords upper-cased, `OID.`
//! prefixes dropped); deciding which types are supported is the mapper's job.

use der::{Any, Decode};

use crate::error::NameError;

/// Characters that may follow a `\` in a value.
const ESCAPABLE: &[char] = &[',', '+', '=', '"', '\\', '<', '>', ';', '#', ' '];

/// One attribute-type/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    /// Normalised attribute type: an upper-cased keyword or a dotted OID.
    pub attribute_type: String,
    /// The unescaped value.
    pub value: String,
}

/// Decompose `text` into its RDNs, in input order.
///
/// Blank input yields no RDNs.
///
/// # Errors
///
/// Returns [`NameError::Malformed`] for any structural defect.
pub fn decompose(text: &str) -> Result<Vec<Rdn>, NameError> {
    let segments = split_rdns(text)?;
    let rdns = segments
        .into_iter()
        .map(parse_rdn)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(rdn_count = rdns.len(), "decomposed distinguished name");
    Ok(rdns)
}

/// Whitespace that is insignificant around unquoted values.
pub(crate) fn is_dn_whitespace(c: char) -> bool {
    c == ' ' || c == '\n'
}

fn split_rdns(text: &str) -> Result<Vec<&str>, NameError> {
    if text.trim_matches(is_dn_whitespace).is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            ',' | ';' => {
                segments.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            '+' => return Err(NameError::malformed("multi-valued RDNs are not supported")),
            '<' | '>' => {
                return Err(NameError::malformed(format!(
                    "unescaped '{c}' outside quotes"
                )))
            }
            _ => {}
        }
    }

    if escaped {
        return Err(NameError::malformed("name ends with a dangling escape"));
    }
    if in_quotes {
        return Err(NameError::malformed("unbalanced quotes"));
    }
    segments.push(&text[start..]);
    Ok(segments)
}

fn parse_rdn(segment: &str) -> Result<Rdn, NameError> {
    if segment.trim().is_empty() {
        return Err(NameError::malformed("empty RDN"));
    }
    let (raw_type, raw_value) = segment.split_once('=').ok_or_else(|| {
        NameError::malformed(format!("RDN \"{}\" has no '=' separator", segment.trim()))
    })?;
    Ok(Rdn {
        attribute_type: parse_attribute_type(raw_type)?,
        value: parse_value(raw_value)?,
    })
}

fn parse_attribute_type(raw: &str) -> Result<String, NameError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(NameError::malformed("empty attribute type"));
    }

    let dotted = crate::attribute::strip_oid_prefix(token);
    let is_oid = !dotted.is_empty()
        && dotted
            .split('.')
            .all(|arc| !arc.is_empty() && arc.chars().all(|c| c.is_ascii_digit()));
    if is_oid {
        return Ok(dotted.to_string());
    }

    let is_keyword = token.starts_with(|c: char| c.is_ascii_alphabetic())
        && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if is_keyword {
        return Ok(token.to_ascii_uppercase());
    }

    Err(NameError::malformed(format!(
        "invalid attribute type \"{token}\""
    )))
}

fn parse_value(raw: &str) -> Result<String, NameError> {
    let value = raw.trim_start_matches(is_dn_whitespace);
    if let Some(rest) = value.strip_prefix('"') {
        return parse_quoted(rest);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return decode_hex_value(hex.trim_end_matches(is_dn_whitespace));
    }
    parse_unquoted(value)
}

fn parse_unquoted(value: &str) -> Result<String, NameError> {
    let mut out = ValueBuilder::default();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescape(&mut chars, &mut out)?,
            '"' => {
                return Err(NameError::malformed(
                    "unescaped '\"' inside an unquoted value",
                ))
            }
            '<' | '>' | '+' | ',' | ';' => {
                return Err(NameError::malformed(format!("unescaped '{c}' in value")))
            }
            c if is_dn_whitespace(c) => out.push(c, false)?,
            c => out.push(c, true)?,
        }
    }
    out.finish(true)
}

fn parse_quoted(rest: &str) -> Result<String, NameError> {
    let mut out = ValueBuilder::default();
    let mut chars = rest.chars();
    loop {
        match chars.next() {
            None => return Err(NameError::malformed("unterminated quoted value")),
            Some('\\') => unescape(&mut chars, &mut out)?,
            Some('"') => break,
            Some(c) => out.push(c, true)?,
        }
    }
    if !chars.as_str().trim_matches(is_dn_whitespace).is_empty() {
        return Err(NameError::malformed(
            "unexpected characters after closing quote",
        ));
    }
    out.finish(false)
}

fn unescape(chars: &mut std::str::Chars<'_>, out: &mut ValueBuilder) -> Result<(), NameError> {
    let c = chars
        .next()
        .ok_or_else(|| NameError::malformed("value ends with a dangling escape"))?;

    if let Some(high) = c.to_digit(16) {
        let low = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or_else(|| NameError::malformed("incomplete hex escape"))?;
        out.push_byte((high * 16 + low) as u8);
        return Ok(());
    }

    if ESCAPABLE.contains(&c) {
        out.push(c, true)
    } else {
        Err(NameError::malformed(format!("invalid escape sequence \\{c}")))
    }
}

fn decode_hex_value(hex: &str) -> Result<String, NameError> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(NameError::malformed(format!(
            "invalid hex-encoded value \"#{hex}\""
        )));
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| NameError::malformed(format!("invalid hex-encoded value: {e}")))?;
    let any = Any::from_der(&bytes)
        .map_err(|e| NameError::malformed(format!("invalid BER-encoded value: {e}")))?;
    crate::principal::decode_string(&any)
}

/// Accumulates an unescaped value.
///
/// Hex escapes are collected as raw bytes and decoded as UTF-8 once the run
/// ends. `significant` marks the end of the last character that survives
/// trailing-whitespace trimming.
#[derive(Default)]
struct ValueBuilder {
    out: String,
    pending: Vec<u8>,
    significant: usize,
}

impl ValueBuilder {
    fn push(&mut self, c: char, significant: bool) -> Result<(), NameError> {
        self.flush()?;
        self.out.push(c);
        if significant {
            self.significant = self.out.len();
        }
        Ok(())
    }

    fn push_byte(&mut self, byte: u8) {
        self.pending.push(byte);
    }

    fn flush(&mut self) -> Result<(), NameError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::take(&mut self.pending);
        let decoded = String::from_utf8(bytes)
            .map_err(|_| NameError::malformed("hex escapes do not form valid UTF-8"))?;
        self.out.push_str(&decoded);
        self.significant = self.out.len();
        Ok(())
    }

    fn finish(mut self, trim_trailing: bool) -> Result<String, NameError> {
        self.flush()?;
        if trim_trailing {
            self.out.truncate(self.significant);
        }
        Ok(self.out)
    }
}
