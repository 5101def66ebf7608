//! Collects annotated structs from the source directory.

use std::collections::BTreeMap;

use accessor_gen::{RecordType, scan_source};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use crate::error::{AccessorsError, io_at};
use crate::output::GENERATED_HEADER;
use crate::settings::Settings;

/// Reads every candidate file in `settings.dir` and returns its records.
///
/// Files are visited in name order and only the top level of the directory
/// is scanned. The output file and any previously generated file are
/// skipped.
///
/// # Errors
///
/// Returns [`AccessorsError::Io`] or [`AccessorsError::Scan`] when a file
/// cannot be read or parsed, [`AccessorsError::AmbiguousType`] when two files
/// declare the same type, and [`AccessorsError::TypeNotFound`] when a
/// requested type is missing.
pub fn collect_records(
    settings: &Settings,
    output: &Utf8Path,
) -> Result<Vec<RecordType>, AccessorsError> {
    let root = &settings.dir;
    let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(io_at(root))?;
    let excluded = excluded_name(root, output);

    let mut names = Vec::new();
    for entry in dir.entries().map_err(io_at(root))? {
        let entry = entry.map_err(io_at(root))?;
        if !entry.file_type().map_err(io_at(root))?.is_file() {
            continue;
        }
        let name = entry.file_name().map_err(io_at(root))?;
        if is_candidate(&name, settings, excluded.as_deref()) {
            names.push(name);
        }
    }
    names.sort();

    let mut declared: BTreeMap<String, Utf8PathBuf> = BTreeMap::new();
    let mut records = Vec::new();
    for name in names {
        let path = root.join(&name);
        let text = dir.read_to_string(&name).map_err(io_at(&path))?;
        if text.starts_with(GENERATED_HEADER) {
            debug!(%path, "skipping generated file");
            continue;
        }
        let found = scan_source(&text, &settings.types).map_err(|source| AccessorsError::Scan {
            path: path.clone(),
            source,
        })?;
        for record in found {
            if let Some(first) = declared.get(&record.name) {
                return Err(AccessorsError::AmbiguousType {
                    name: record.name,
                    first: first.clone(),
                    second: path,
                });
            }
            debug!(record = %record.name, %path, "found struct");
            declared.insert(record.name.clone(), path.clone());
            records.push(record);
        }
    }

    if let Some(missing) = settings
        .types
        .iter()
        .find(|target| !declared.contains_key(target.as_str()))
    {
        return Err(AccessorsError::TypeNotFound(missing.clone()));
    }
    Ok(records)
}

fn is_candidate(name: &str, settings: &Settings, excluded: Option<&str>) -> bool {
    Utf8Path::new(name).extension() == Some("rs")
        && excluded != Some(name)
        && (settings.files.is_empty() || settings.files.iter().any(|file| file == name))
}

/// File name of `output` when it lives directly in `root`.
fn excluded_name(root: &Utf8Path, output: &Utf8Path) -> Option<String> {
    let parent = output
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let same_dir = parent == root
        || matches!(
            (parent.canonicalize_utf8(), root.canonicalize_utf8()),
            (Ok(a), Ok(b)) if a == b
        );
    if same_dir {
        output.file_name().map(str::to_owned)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("model.rs", &[], None, true)]
    #[case("model.txt", &[], None, false)]
    #[case("accessors.rs", &[], Some("accessors.rs"), false)]
    #[case("model.rs", &["other.rs"], None, false)]
    #[case("other.rs", &["other.rs"], None, true)]
    fn filters_candidate_files(
        #[case] name: &str,
        #[case] files: &[&str],
        #[case] excluded: Option<&str>,
        #[case] expected: bool,
    ) {
        let settings = Settings {
            files: files.iter().map(|file| (*file).to_owned()).collect(),
            ..Settings::default()
        };
        assert_eq!(is_candidate(name, &settings, excluded), expected);
    }

    #[test]
    fn output_in_another_directory_excludes_nothing() {
        assert_eq!(
            excluded_name(Utf8Path::new("src/model"), Utf8Path::new("src/other/gen.rs")),
            None
        );
    }

    #[test]
    fn bare_output_name_is_excluded_from_current_directory() {
        assert_eq!(
            excluded_name(Utf8Path::new("."), Utf8Path::new("gen.rs")).as_deref(),
            Some("gen.rs")
        );
    }
}
