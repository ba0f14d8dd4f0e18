//! # Normalize Subcommand
//!
//! Parses each name argument and prints its canonical form.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use mxn_core::{DistinguishedName, NameRules};

use crate::report::{exit_code, NameReport, OutputFormat};

/// Arguments for the `mxn normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Names to normalize, e.g. "O=Bank A, L=New York, C=US".
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

/// Execute the normalize subcommand.
///
/// Returns exit code: 0 if every name is valid, 1 otherwise.
pub fn run_normalize<O: Write, E: Write>(
    args: &NormalizeArgs,
    rules: &NameRules,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<u8> {
    let mut reports = Vec::with_capacity(args.names.len());
    for name in &args.names {
        let report = NameReport::new(name, &DistinguishedName::parse_with(name, rules));
        report.emit(format, out, err, |r| match (&r.canonical, &r.error) {
            (Some(canonical), _) => canonical.clone(),
            (None, Some(e)) => format!("error: {}: {e}", r.input),
            (None, None) => String::new(),
        })?;
        reports.push(report);
    }
    Ok(exit_code(&reports))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(names: &[&str], format: OutputFormat) -> (u8, String, String) {
        let args = NormalizeArgs {
            names: names.iter().map(|s| s.to_string()).collect(),
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_normalize(&args, &NameRules::default(), format, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn prints_canonical_forms() {
        let (code, out, err) = run(
            &["O=Bank A, L=New York, C=US, OU=Org Unit, CN=Service Name", "c=GB;l=London;o=Bank B"],
            OutputFormat::Text,
        );
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "CN=Service Name, OU=Org Unit, O=Bank A, L=New York, C=US\nO=Bank B, L=London, C=GB\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn failures_go_to_stderr_and_set_exit_code() {
        let (code, out, err) = run(
            &["O=Bank A, L=New York, C=US", "O=Bank A, L=New York, C=US, SN=blah"],
            OutputFormat::Text,
        );
        assert_eq!(code, 1);
        assert_eq!(out, "O=Bank A, L=New York, C=US\n");
        assert!(err.starts_with("error: O=Bank A, L=New York, C=US, SN=blah: "));
        assert!(err.contains("\"SN\""));
    }

    #[test]
    fn json_lines_for_every_input() {
        let (code, out, err) = run(&["O=Bank A, L=Paris, C=FR", "O=B, L=Paris, C=FR"], OutputFormat::Json);
        assert_eq!(code, 1);
        assert!(err.is_empty());
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["canonical"], "O=Bank A, L=Paris, C=FR");
        assert_eq!(lines[0]["locality"], "Paris");
        assert!(lines[1]["error"].as_str().unwrap().contains("two letters"));
    }
}
