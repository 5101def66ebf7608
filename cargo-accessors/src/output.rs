//! Assembles, formats and writes the generated file.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::{AccessorsError, io_at};
use crate::settings::Settings;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by cargo-accessors. DO NOT EDIT.";
/// Brings the annotated types into scope of the generated module.
pub const PRELUDE: &str = "use super::*;";

/// Builds the final file text for `code`.
///
/// The optional `#![cfg(...)]` attribute and prelude are prepended, the
/// result is parsed to make sure it is valid Rust, formatted, and headed by
/// [`GENERATED_HEADER`].
///
/// # Errors
///
/// Returns [`AccessorsError::InvalidOutput`] when the assembled text does
/// not parse.
pub fn render(code: &str, settings: &Settings) -> Result<String, AccessorsError> {
    let mut body = String::new();
    if let Some(predicate) = settings
        .cfg
        .as_deref()
        .map(str::trim)
        .filter(|predicate| !predicate.is_empty())
    {
        body.push_str(&format!("#![cfg({predicate})]\n"));
    }
    if !settings.no_prelude {
        body.push_str(PRELUDE);
        body.push('\n');
    }
    body.push_str(code);
    let file = syn::parse_file(&body)?;
    Ok(format!("{GENERATED_HEADER}\n\n{}", prettyplease::unparse(&file)))
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`AccessorsError::OutputPath`] when `path` has no file name and
/// [`AccessorsError::Io`] when the file cannot be written.
pub fn write(path: &Utf8Path, content: &str) -> Result<(), AccessorsError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AccessorsError::OutputPath(path.to_path_buf()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_at(path))?;
    file.write_all(content.as_bytes()).map_err(io_at(path))
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, AccessorsError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_at(path))?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_at(path))
        }
        Err(open_err) => Err(io_at(path)(open_err)),
    }
}
