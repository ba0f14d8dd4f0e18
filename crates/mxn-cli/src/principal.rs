//! # Encode and Decode Subcommands
//!
//! Convert between the string form and the DER principal form, which is
//! what certificates and TLS peers carry.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use mxn_core::{DistinguishedName, NameRules};

use crate::report::{from_hex, to_hex, NameReport, OutputFormat};

/// Arguments for the `mxn encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Name to encode.
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `mxn decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// DER principal form as hex.
    #[arg(value_name = "HEX")]
    pub hex: String,
}

/// Execute the encode subcommand: print the DER principal as lower-case hex.
pub fn run_encode<O: Write, E: Write>(
    args: &EncodeArgs,
    rules: &NameRules,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<u8> {
    let report = match DistinguishedName::parse_with(&args.name, rules) {
        Ok(dn) => match dn.to_der() {
            Ok(der) => NameReport::accepted(&args.name, &dn).with_der(to_hex(der)),
            Err(e) => NameReport::rejected(&args.name, e.to_string()),
        },
        Err(e) => NameReport::rejected(&args.name, e.to_string()),
    };
    report.emit(format, out, err, |r| match (&r.der, &r.error) {
        (Some(der), _) => der.clone(),
        (None, e) => format!("error: {}", e.as_deref().unwrap_or_default()),
    })?;
    Ok(u8::from(!report.is_ok()))
}

/// Execute the decode subcommand: print the canonical form of a hex DER principal.
pub fn run_decode<O: Write, E: Write>(
    args: &DecodeArgs,
    rules: &NameRules,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<u8> {
    let report = match from_hex(&args.hex) {
        Ok(bytes) => NameReport::new(&args.hex, &DistinguishedName::from_der_with(&bytes, rules)),
        Err(e) => NameReport::rejected(&args.hex, e),
    };
    report.emit(format, out, err, |r| match (&r.canonical, &r.error) {
        (Some(canonical), _) => canonical.clone(),
        (None, e) => format!("error: {}", e.as_deref().unwrap_or_default()),
    })?;
    Ok(u8::from(!report.is_ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(name: &str) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let args = EncodeArgs {
            name: name.to_string(),
        };
        let code = run_encode(&args, &NameRules::default(), OutputFormat::Text, &mut out, &mut err)
            .unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn decode(hex: &str, format: OutputFormat) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let args = DecodeArgs {
            hex: hex.to_string(),
        };
        let code = run_decode(&args, &NameRules::default(), format, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn encode_then_decode() {
        let (code, hex, _) = encode("O=Bank A, L=New York, C=US, CN=Service Name");
        assert_eq!(code, 0);
        let hex = hex.trim();
        assert!(hex.starts_with("30"));
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let (code, out, err) = decode(hex, OutputFormat::Text);
        assert_eq!(code, 0, "{err}");
        assert_eq!(out, "CN=Service Name, O=Bank A, L=New York, C=US\n");
    }

    #[test]
    fn encode_rejects_invalid_name() {
        let (code, out, err) = encode("O=Bank A, L=New York");
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("error: "));
    }

    #[test]
    fn decode_rejects_bad_hex_and_bad_der() {
        let (code, _, err) = decode("30z", OutputFormat::Text);
        assert_eq!(code, 1);
        assert!(err.contains("odd length"));

        let (code, _, err) = decode("ff00", OutputFormat::Text);
        assert_eq!(code, 1);
        assert!(err.contains("principal encoding error"));
    }

    #[test]
    fn decode_json_includes_fields() {
        let (_, hex, _) = encode("O=Bank A, L=New York, ST=NY, C=US");
        let (code, out, _) = decode(hex.trim(), OutputFormat::Json);
        assert_eq!(code, 0);
        let json: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(json["state"], "NY");
        assert_eq!(json["canonical"], "O=Bank A, L=New York, ST=NY, C=US");
    }
}
