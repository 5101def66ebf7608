//! Errors raised while turning Rust declarations into records.

use thiserror::Error;

/// Failures while reading struct declarations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source text is not valid Rust.
    #[error("failed to parse Rust source: {0}")]
    Parse(#[from] syn::Error),

    /// The named item is an enum or union.
    #[error("`{0}` is not a struct; accessors can only be generated for structs")]
    NotAStruct(String),

    /// The named struct is a tuple struct.
    #[error("`{0}` has unnamed fields; accessors need named fields")]
    UnnamedFields(String),
}
