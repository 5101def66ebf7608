//! Library interface for the `cargo accessors` subcommand.
//!
//! The command scans a directory of Rust sources for structs carrying
//! `accessor:` directives, generates their accessors with `accessor_gen`,
//! and writes the result to a single formatted file meant to be included as
//! a child module of the annotated types.

pub mod cli;
pub mod error;
pub mod output;
pub mod settings;
pub mod source;

use accessor_gen::generate;
use camino::Utf8PathBuf;
use tracing::info;

pub use cli::Args;
pub use error::AccessorsError;
pub use settings::Settings;

/// Runs one generation pass and returns the path that was written.
///
/// # Errors
///
/// Returns an [`AccessorsError`] when validation, scanning, rendering or
/// writing fails.
pub fn run(settings: &Settings) -> Result<Utf8PathBuf, AccessorsError> {
    settings.validate()?;
    let output_path = settings.output_path()?;
    let records = source::collect_records(settings, output_path)?;
    let code = generate(&records, &settings.global_defaults());
    let rendered = output::render(&code, settings)?;
    output::write(output_path, &rendered)?;
    info!(path = %output_path, records = records.len(), "wrote accessors");
    Ok(output_path.to_path_buf())
}
