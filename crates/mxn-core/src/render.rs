//! # Canonical Rendering
//!
//! Renders a [`DistinguishedName`] as `CN=..., OU=..., O=..., L=..., ST=..., C=...`
//! with absent optional attributes omitted entirely.
//!
//! ## Value escaping
//!
//! Values are scanned once, left to right, against the PrintableString
//! character class (X.680): letters, digits, space and `' ( ) + , - . / : = ?`.
//! A value is wrapped in double quotes when it contains a special character
//! (`, + = \n < > # ; \ "`), starts or ends with whitespace, or has two
//! consecutive whitespace characters. `"` and `\` are backslash-escaped.
//! Characters outside both the printable class and the special set are
//! copied verbatim and never trigger quoting.
//!
//! A value that already begins and ends with `"` keeps those outer quotes
//! as they are and is never re-quoted.

use crate::name::DistinguishedName;
use crate::rdn::is_dn_whitespace;

/// Characters that force a value to be quoted.
const SPECIALS: &[char] = &[',', '+', '=', '\n', '<', '>', '#', ';', '\\', '"'];

/// Separator between rendered RDNs.
const RDN_SEPARATOR: &str = ", ";

/// Whether `c` belongs to the ASN.1 PrintableString character set.
pub fn is_printable_string_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?'
        )
}

/// Escape (and quote, if needed) a single attribute value.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_escaped(&mut out, value);
    out
}

pub(crate) fn render(dn: &DistinguishedName) -> String {
    let mut out = String::new();
    // Most-specific first: the reverse of the RDN sequence order.
    for (i, (tag, value)) in dn.rdn_sequence().into_iter().rev().enumerate() {
        if i > 0 {
            out.push_str(RDN_SEPARATOR);
        }
        out.push_str(tag.keyword());
        out.push('=');
        write_escaped(&mut out, value);
    }
    out
}

fn write_escaped(out: &mut String, value: &str) {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    let already_quoted = len > 1 && chars[0] == '"' && chars[len - 1] == '"';

    let mut escaped = String::with_capacity(value.len());
    let mut quote_needed = false;
    let mut previous_white = false;

    for (i, &c) in chars.iter().enumerate() {
        if already_quoted && (i == 0 || i == len - 1) {
            escaped.push(c);
            continue;
        }

        if !is_printable_string_char(c) && !SPECIALS.contains(&c) {
            previous_white = false;
            escaped.push(c);
            continue;
        }

        if SPECIALS.contains(&c) || (i == 0 && is_dn_whitespace(c)) {
            quote_needed = true;
        }

        if is_dn_whitespace(c) {
            if previous_white {
                quote_needed = true;
            }
            previous_white = true;
        } else {
            if c == '"' || c == '\\' {
                escaped.push('\\');
            }
            previous_white = false;
        }
        escaped.push(c);
    }

    if escaped.ends_with(is_dn_whitespace) {
        quote_needed = true;
    }

    if quote_needed && !already_quoted {
        out.push('"');
        out.push_str(&escaped);
        out.push('"');
    } else {
        out.push_str(&escaped);
    }
}
