//! Command-line interface definitions for `cargo-accessors`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;

/// Subcommand name cargo passes as the first argument.
pub const CARGO_SUBCOMMAND: &str = "accessors";

/// Parsed CLI arguments for `cargo-accessors`.
///
/// Only flags that were actually given are serialised, so the struct can be
/// merged as the top configuration layer without masking file or
/// environment values.
#[derive(Debug, Clone, Default, Parser, Serialize)]
#[command(name = "cargo-accessors", bin_name = "cargo accessors")]
#[command(about = "Generate accessor methods for Rust structs")]
#[command(version)]
pub struct Args {
    /// Source files to scan; every `.rs` file in the directory when empty.
    #[arg(value_name = "file")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Directory holding the annotated structs.
    #[arg(long, value_name = "path")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<Utf8PathBuf>,
    /// File the generated code is written to.
    #[arg(long, short, value_name = "path")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Utf8PathBuf>,
    /// Comma-separated list of types to generate for.
    #[arg(long, value_name = "Type", value_delimiter = ',')]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Generate getters for every field of the single target type.
    #[arg(long)]
    #[serde(skip_serializing_if = "is_unset")]
    pub getter: bool,
    /// Prefix for default getter names.
    #[arg(long, value_name = "prefix")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_prefix: Option<String>,
    /// Generate setters for every field of the single target type.
    #[arg(long)]
    #[serde(skip_serializing_if = "is_unset")]
    pub setter: bool,
    /// Prefix for default setter names.
    #[arg(long, value_name = "prefix")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_prefix: Option<String>,
    /// Generate an initializer for the single target type.
    #[arg(long)]
    #[serde(skip_serializing_if = "is_unset")]
    pub construct: bool,
    /// Name of the generated initializer.
    #[arg(long, value_name = "name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
    /// Prefix for the source trait's accessor names.
    #[arg(long, value_name = "prefix")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construct_prefix: Option<String>,
    /// Predicate for a file-level `#![cfg(...)]` attribute.
    #[arg(long, value_name = "predicate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<String>,
    /// Omit the `use super::*;` prelude.
    #[arg(long)]
    #[serde(skip_serializing_if = "is_unset")]
    pub no_prelude: bool,
    /// Configuration file; defaults to `.accessors.toml` when present.
    #[arg(long, value_name = "path", env = "ACCESSORS_CONFIG_PATH")]
    #[serde(skip)]
    pub config_path: Option<Utf8PathBuf>,
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde passes skip predicates by reference"
)]
const fn is_unset(flag: &bool) -> bool {
    !*flag
}

impl Args {
    /// Parses arguments, dropping the subcommand name cargo inserts.
    #[must_use]
    pub fn parse_cargo() -> Self {
        Self::parse_from(strip_cargo_subcommand(std::env::args_os()))
    }
}

/// Removes the `accessors` argument cargo passes when the binary is invoked
/// as `cargo accessors`.
pub fn strip_cargo_subcommand<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.get(1).is_some_and(|arg| arg == CARGO_SUBCOMMAND) {
        args.remove(1);
    }
    args
}
