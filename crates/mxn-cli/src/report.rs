//! # Per-Input Reports
//!
//! Every subcommand produces one [`NameReport`] per input and writes it as
//! plain text or as one JSON object per line.

use std::io::Write;

use anyhow::Result;
use mxn_core::{DistinguishedName, NameError};
use serde::Serialize;

/// How reports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// `Json` when `json` is set, else `Text`.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// The six fields of an accepted name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_unit: Option<String>,
    pub organisation: String,
    pub locality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
}

impl From<&DistinguishedName> for NameFields {
    fn from(dn: &DistinguishedName) -> Self {
        Self {
            common_name: dn.common_name().map(str::to_string),
            organisation_unit: dn.organisation_unit().map(str::to_string),
            organisation: dn.organisation().to_string(),
            locality: dn.locality().to_string(),
            state: dn.state().map(str::to_string),
            country: dn.country().to_string(),
        }
    }
}

/// Outcome for a single input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub der: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: Option<NameFields>,
}

impl NameReport {
    /// Report on a parse or decode outcome.
    pub fn new(input: &str, outcome: &Result<DistinguishedName, NameError>) -> Self {
        match outcome {
            Ok(dn) => Self::accepted(input, dn),
            Err(e) => Self::rejected(input, e.to_string()),
        }
    }

    /// Report an accepted name.
    pub fn accepted(input: &str, dn: &DistinguishedName) -> Self {
        Self {
            input: input.to_string(),
            canonical: Some(dn.canonical().to_string()),
            der: None,
            error: None,
            fields: Some(NameFields::from(dn)),
        }
    }

    /// Report a rejected input.
    pub fn rejected(input: &str, error: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            canonical: None,
            der: None,
            error: Some(error.into()),
            fields: None,
        }
    }

    /// Attach the hex DER principal form.
    pub fn with_der(mut self, der_hex: String) -> Self {
        self.der = Some(der_hex);
        self
    }

    /// Whether the input was accepted.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Write this report as JSON (one line) or via `text` for the text form.
    ///
    /// Accepted text goes to `out`; rejected text goes to `err`.
    pub fn emit<O: Write, E: Write>(
        &self,
        format: OutputFormat,
        out: &mut O,
        err: &mut E,
        text: impl FnOnce(&Self) -> String,
    ) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Text if self.is_ok() => writeln!(out, "{}", text(self))?,
            OutputFormat::Text => writeln!(err, "{}", text(self))?,
        }
        Ok(())
    }
}

/// Exit code for a batch: `1` if any report is a rejection.
pub fn exit_code(reports: &[NameReport]) -> u8 {
    u8::from(reports.iter().any(|r| !r.is_ok()))
}

/// Lower-case hex.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse hex, tolerating surrounding whitespace and either case.
pub fn from_hex(text: &str) -> Result<Vec<u8>, String> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(format!("hex input has odd length {}", text.len()));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            text.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex at offset {i}"))
        })
        .collect()
}
