//! Source rendering for resolved accessors and construction plans.
//!
//! Every function here is plain template substitution over values that the
//! policy resolver and the construction planner already decided. Nothing in
//! this module reads directives.

use crate::construct::ConstructPlan;
use crate::model::RecordType;
use crate::policy::FieldResolution;

const INDENT: &str = "    ";
const LINT_ALLOWANCES: &str = "#[allow(non_snake_case, clippy::clone_on_copy)]";

/// Visibility token meaning "no `pub` qualifier".
pub const PRIVATE_VISIBILITY: &str = "priv";

/// Renders the getter for `resolution`, or an empty string.
#[must_use]
pub fn getter(resolution: &FieldResolution) -> String {
    let Some(getter) = &resolution.getter else {
        return String::new();
    };
    let vis = visibility(&resolution.visibility);
    let field = &resolution.field;
    let ty = &resolution.ty;
    if getter.by_ref {
        format!(
            "{INDENT}/// Returns a reference to `{field}`.\n\
             {INDENT}{vis}fn {name}(&self) -> &{ty} {{\n\
             {INDENT}{INDENT}&self.{field}\n\
             {INDENT}}}\n",
            name = getter.name,
        )
    } else {
        format!(
            "{INDENT}/// Returns a copy of `{field}`.\n\
             {INDENT}{vis}fn {name}(&self) -> {ty} {{\n\
             {INDENT}{INDENT}self.{field}.clone()\n\
             {INDENT}}}\n",
            name = getter.name,
        )
    }
}

/// Renders the setter for `resolution`, or an empty string.
///
/// Fields bound to a hand-written method through `construct` get no setter.
#[must_use]
pub fn setter(resolution: &FieldResolution) -> String {
    let Some(setter) = resolution.setter.as_ref().filter(|_| resolution.emits_setter()) else {
        return String::new();
    };
    let vis = visibility(&resolution.visibility);
    let field = &resolution.field;
    format!(
        "{INDENT}/// Replaces `{field}`.\n\
         {INDENT}{vis}fn {name}(&mut self, value: {ty}) {{\n\
         {INDENT}{INDENT}self.{field} = value;\n\
         {INDENT}}}\n",
        name = setter.name,
        ty = resolution.ty,
    )
}

/// Renders the source trait the initializer reads from.
#[must_use]
pub fn source_trait(record: &RecordType, plan: &ConstructPlan) -> String {
    let vis = visibility(&plan.visibility);
    let mut out = format!(
        "/// Supplies field values to `{name}::{method}`.\n\
         {LINT_ALLOWANCES}\n\
         {vis}trait {source}{params}{where_clause} {{\n",
        name = record.name,
        method = plan.method,
        source = plan.source_trait,
        params = record.generics.declaration(),
        where_clause = record.generics.where_suffix(),
    );
    for entry in &plan.entries {
        out.push_str(&format!(
            "{INDENT}/// Value for `{field}`.\n\
             {INDENT}fn {accessor}(&self) -> {ty};\n",
            field = entry.field,
            accessor = plan.accessor_for(&entry.field),
            ty = entry.ty,
        ));
    }
    out.push_str("}\n");
    out
}

/// Renders the initializer method.
///
/// An empty plan yields a method that only returns `self`.
#[must_use]
pub fn construct(record: &RecordType, plan: &ConstructPlan) -> String {
    let vis = visibility(&plan.visibility);
    let param = if plan.entries.is_empty() {
        "_source"
    } else {
        "source"
    };
    let mut out = format!(
        "{INDENT}/// Copies every participating field from `source`.\n\
         {INDENT}{vis}fn {method}(&mut self, {param}: &impl {source}{args}) -> &mut Self {{\n",
        method = plan.method,
        source = plan.source_trait,
        args = record.generics.arguments(),
    );
    for entry in &plan.entries {
        out.push_str(&format!(
            "{INDENT}{INDENT}self.{setter}(source.{accessor}());\n",
            setter = entry.setter,
            accessor = plan.accessor_for(&entry.field),
        ));
    }
    out.push_str(&format!("{INDENT}{INDENT}self\n{INDENT}}}\n"));
    out
}

/// Wraps rendered methods in an inherent `impl` block for `record`.
#[must_use]
pub fn impl_block(record: &RecordType, methods: &[String]) -> String {
    format!(
        "{LINT_ALLOWANCES}\n\
         impl{params} {name}{where_clause} {{\n{body}}}\n",
        params = record.generics.declaration(),
        name = record.display_name(),
        where_clause = record.generics.where_suffix(),
        body = methods.join("\n"),
    )
}

fn visibility(vis: &str) -> String {
    match vis.trim() {
        "" | PRIVATE_VISIBILITY => String::new(),
        other => format!("{other} "),
    }
}
