//! Error types for `cargo-accessors`.

use accessor_gen::ScanError;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors surfaced by the `cargo-accessors` pipeline.
#[derive(Debug, Error)]
pub enum AccessorsError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be turned into records.
    #[error("failed to read declarations from {path}: {source}")]
    Scan {
        /// File being scanned.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: ScanError,
    },

    /// Layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Config(Box<figment::Error>),

    /// An explicitly named configuration file does not exist.
    #[error("configuration file {0} does not exist")]
    MissingConfig(Utf8PathBuf),

    /// No output file was configured.
    #[error("no output file given; pass --output")]
    MissingOutput,

    /// The output path does not name a file.
    #[error("output path {0} does not name a file")]
    OutputPath(Utf8PathBuf),

    /// The same type name is declared in more than one file.
    #[error("type `{name}` is declared in both {first} and {second}")]
    AmbiguousType {
        /// Type identifier.
        name: String,
        /// File holding the first declaration.
        first: Utf8PathBuf,
        /// File holding the second declaration.
        second: Utf8PathBuf,
    },

    /// A requested type was not declared in any scanned file.
    #[error("type `{0}` not found")]
    TypeNotFound(String),

    /// Command-level accessor flags were given without a single target type.
    #[error("--getter, --setter, --construct and --constructor require exactly one --types entry")]
    GlobalFlagsNeedOneType,

    /// The assembled output is not valid Rust.
    #[error("generated code is not valid Rust: {0}")]
    InvalidOutput(#[from] syn::Error),
}

impl From<figment::Error> for AccessorsError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Builds a closure mapping an I/O error at `path` into [`AccessorsError::Io`].
pub(crate) fn io_at(path: &Utf8Path) -> impl FnOnce(std::io::Error) -> AccessorsError {
    move |source| AccessorsError::Io {
        path: path.to_path_buf(),
        source,
    }
}
