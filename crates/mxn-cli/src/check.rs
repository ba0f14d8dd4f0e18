//! # Check Subcommand
//!
//! Vets a batch of names read one per line, typically piped from a
//! membership export. Blank lines are skipped.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use mxn_core::{DistinguishedName, NameRules};

use crate::report::{NameReport, OutputFormat};

/// Arguments for the `mxn check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only print rejected lines.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the check subcommand over `input`.
///
/// Text output is `ok<TAB>canonical` or `error<TAB>line N<TAB>input<TAB>reason`.
/// Returns exit code: 0 if every line is valid, 1 otherwise.
pub fn run_check<I: BufRead, O: Write, E: Write>(
    args: &CheckArgs,
    rules: &NameRules,
    format: OutputFormat,
    input: I,
    out: &mut O,
    err: &mut E,
) -> Result<u8> {
    let mut checked = 0usize;
    let mut failed = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read input line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let report = NameReport::new(&line, &DistinguishedName::parse_with(&line, rules));
        if !(args.quiet && report.is_ok()) {
            report.emit(format, out, err, |r| match (&r.canonical, &r.error) {
                (Some(canonical), _) => format!("ok\t{canonical}"),
                (None, e) => format!(
                    "error\tline {}\t{}\t{}",
                    index + 1,
                    r.input,
                    e.as_deref().unwrap_or_default()
                ),
            })?;
        }
        checked += 1;
        if !report.is_ok() {
            failed += 1;
        }
    }

    tracing::info!(checked, failed, "check complete");
    Ok(u8::from(failed > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, quiet: bool) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_check(
            &CheckArgs { quiet },
            &NameRules::default(),
            OutputFormat::Text,
            input.as_bytes(),
            &mut out,
            &mut err,
        )
        .unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn reports_each_non_blank_line() {
        let (code, out, err) = run("O=Bank A, L=New York, C=US\n\n  \nO=Bank B, L=Paris, C=FR\n", false);
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "ok\tO=Bank A, L=New York, C=US\nok\tO=Bank B, L=Paris, C=FR\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn rejected_lines_carry_line_numbers() {
        let (code, out, err) = run("O=Bank A, L=New York, C=US\n\nO=A, L=B, C=US, O=C\n", false);
        assert_eq!(code, 1);
        assert_eq!(out.lines().count(), 1);
        assert!(err.starts_with("error\tline 3\tO=A, L=B, C=US, O=C\t"));
        assert!(err.contains("duplicate attribute O"));
    }

    #[test]
    fn quiet_suppresses_accepted_lines() {
        let (code, out, err) = run("O=Bank A, L=New York, C=US\nO=Bank A, L=New York, C=XX\n", true);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("\"XX\""));
    }

    #[test]
    fn failure_anywhere_in_a_long_stream_sets_exit_code() {
        let mut input = "O=Bank A, L=New York, C=US\n".repeat(5_000);
        input.push_str("O=Bank A, L=New York\n");
        input.push_str(&"O=Bank B, L=Paris, C=FR\n".repeat(5_000));
        let (code, out, err) = run(&input, true);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("error\tline 5001\t"));
    }

    #[test]
    fn empty_input_passes() {
        assert_eq!(run("", false).0, 0);
    }
}
