//! # mxn-cli: Member Name Command-Line Interface
//!
//! A thin clap front end over `mxn-core` for operators and scripts that
//! need to normalize, vet, or convert member names without writing Rust.
//!
//! ## Subcommands
//!
//! - `normalize` — parse names given as arguments and print canonical forms
//! - `check` — vet one name per line from stdin
//! - `encode` — print the DER principal form of a name as hex
//! - `decode` — turn a hex DER principal back into a canonical name
//!
//! ## Exit codes
//!
//! `0` when every input is valid, `1` when any input is rejected, `2` on an
//! operational error (unreadable config, broken pipe).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take their inputs,
//!   rules and writers explicitly so they can be driven from tests.
//! - No name rules are implemented here. Every accept/reject decision comes
//!   from `mxn-core`.

pub mod check;
pub mod config;
pub mod normalize;
pub mod principal;
pub mod report;

pub use report::OutputFormat;
