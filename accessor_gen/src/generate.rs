//! One generation pass over a set of records.

use tracing::debug;

use crate::config::GlobalDefaults;
use crate::construct::{ConstructPlanner, ConstructSettings};
use crate::emit;
use crate::model::RecordType;
use crate::policy::{TypeDefaults, resolve_field};

/// Generates the accessors, source trait and initializer for one record.
///
/// Returns an empty string when the record needs no generated code.
///
/// # Examples
///
/// ```
/// use accessor_gen::{Field, GlobalDefaults, RecordType, generate_record};
///
/// let record = RecordType::new("User")
///     .with_field(Field::new("user_name", "String").with_annotation(r#"getter="*", setter="*""#))
///     .with_field(Field::new("Email", "String").with_annotation(r#"getter="-""#));
/// let code = generate_record(&record, &GlobalDefaults::default());
/// assert!(code.contains("pub fn UserName(&self) -> String"));
/// assert!(code.contains("pub fn SetUserName(&mut self, value: String)"));
/// assert!(!code.contains("fn Email("));
/// ```
#[must_use]
pub fn generate_record(record: &RecordType, global: &GlobalDefaults) -> String {
    let defaults = TypeDefaults::resolve(record, global);
    let mut planner = ConstructSettings::resolve(record, global)
        .map(|settings| ConstructPlanner::new(settings, defaults.visibility.clone()));

    let mut methods = Vec::new();
    for field in &record.fields {
        let resolution = resolve_field(field, &defaults);
        methods.extend(
            [emit::getter(&resolution), emit::setter(&resolution)]
                .into_iter()
                .filter(|text| !text.is_empty()),
        );
        if let Some(planner) = planner.as_mut() {
            planner.push(&resolution);
        }
    }

    let mut out = String::new();
    if let Some(plan) = planner.map(ConstructPlanner::finish) {
        out.push_str(&emit::source_trait(record, &plan));
        out.push('\n');
        methods.push(emit::construct(record, &plan));
    }
    if !methods.is_empty() {
        out.push_str(&emit::impl_block(record, &methods));
    }
    debug!(
        record = %record.display_name(),
        methods = methods.len(),
        "generated record accessors"
    );
    out
}

/// Generates code for every record, ordered by rendered type name.
///
/// The sort is stable, so records sharing a name keep their source order.
/// Fragments are separated by a blank line; records that need no code are
/// left out.
#[must_use]
pub fn generate(records: &[RecordType], global: &GlobalDefaults) -> String {
    let mut ordered: Vec<&RecordType> = records.iter().collect();
    ordered.sort_by_key(|record| record.display_name());
    ordered
        .into_iter()
        .map(|record| generate_record(record, global))
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
