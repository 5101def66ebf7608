//! Reading struct declarations from Rust source.
//!
//! Doc comments become comment lines, `#[accessor(...)]` attributes become
//! the field annotation, and types and generic parameters are carried as
//! rendered token text. The same conversion serves the derive macro (from a
//! [`DeriveInput`]) and the command-line scanner (from a whole file).

mod error;

pub use error::ScanError;

use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, GenericParam, Generics, Ident, Item,
    ItemStruct, Lit, Meta, Path, Token,
};
use tracing::{debug, trace};

use crate::directive::DIRECTIVE_PREFIX;
use crate::model::{Field, GenericParams, RecordType};

/// Attribute whose arguments form a field annotation.
pub const ANNOTATION_ATTRIBUTE: &str = "accessor";
/// Derive name marking structs the procedural macro already handles.
pub const DERIVE_NAME: &str = "Accessors";

/// Collects records for the top-level structs of a source file.
///
/// With an empty `targets` list every struct with named fields is
/// returned; otherwise only structs whose identifier is listed. Structs that
/// derive `Accessors` are skipped so code is never generated twice; the
/// `AccessorFields` marker derive only registers the attribute and is
/// scanned like any other struct.
///
/// # Errors
///
/// Returns [`ScanError::Parse`] when `source` is not valid Rust, and
/// [`ScanError::NotAStruct`] or [`ScanError::UnnamedFields`] when a listed
/// target cannot carry accessors.
pub fn scan_source(source: &str, targets: &[String]) -> Result<Vec<RecordType>, ScanError> {
    let file = syn::parse_file(source)?;
    let mut records = Vec::new();
    for item in &file.items {
        let (ident, strukt) = match item {
            Item::Struct(strukt) => (&strukt.ident, Some(strukt)),
            Item::Enum(item) => (&item.ident, None),
            Item::Union(item) => (&item.ident, None),
            _ => continue,
        };
        let targeted = targets.iter().any(|target| ident == target);
        if !targets.is_empty() && !targeted {
            continue;
        }
        let Some(strukt) = strukt else {
            if targeted {
                return Err(ScanError::NotAStruct(ident.to_string()));
            }
            continue;
        };
        if derives_accessors(&strukt.attrs) {
            debug!(record = %ident, "skipping struct that derives Accessors");
            continue;
        }
        match record_from_item(strukt) {
            Ok(record) => records.push(record),
            Err(ScanError::UnnamedFields(name)) if !targeted => {
                debug!(record = %name, "skipping struct with unnamed fields");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(records)
}

/// Builds a record from a parsed struct item.
///
/// Unit structs become records without fields.
///
/// # Errors
///
/// Returns [`ScanError::UnnamedFields`] for tuple structs.
pub fn record_from_item(item: &ItemStruct) -> Result<RecordType, ScanError> {
    record_from_parts(&item.ident, &item.generics, &item.attrs, &item.fields)
}

/// Builds a record from derive macro input.
///
/// # Errors
///
/// Returns [`ScanError::NotAStruct`] for enums and unions, and
/// [`ScanError::UnnamedFields`] for tuple structs.
pub fn record_from_derive(input: &DeriveInput) -> Result<RecordType, ScanError> {
    match &input.data {
        Data::Struct(data) => {
            record_from_parts(&input.ident, &input.generics, &input.attrs, &data.fields)
        }
        Data::Enum(_) | Data::Union(_) => Err(ScanError::NotAStruct(input.ident.to_string())),
    }
}

fn record_from_parts(
    ident: &Ident,
    generics: &Generics,
    attrs: &[Attribute],
    fields: &Fields,
) -> Result<RecordType, ScanError> {
    let name = ident.to_string();
    let fields = match fields {
        Fields::Named(named) => named.named.iter().filter_map(field_from_syn).collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => return Err(ScanError::UnnamedFields(name)),
    };
    Ok(RecordType {
        name,
        generics: generic_params(generics),
        comments: doc_lines(attrs),
        fields,
    })
}

fn field_from_syn(field: &syn::Field) -> Option<Field> {
    let name = field.ident.as_ref()?.to_string();
    Some(Field {
        name,
        ty: field.ty.to_token_stream().to_string(),
        annotation: annotation(&field.attrs),
        comments: doc_lines(&field.attrs),
    })
}

fn generic_params(generics: &Generics) -> GenericParams {
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let declaration = impl_generics.to_token_stream().to_string();
    let params = declaration
        .trim()
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or_default()
        .trim()
        .to_owned();
    let args = generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Lifetime(def) => def.lifetime.to_string(),
            GenericParam::Type(def) => def.ident.to_string(),
            GenericParam::Const(def) => def.ident.to_string(),
        })
        .collect();
    GenericParams {
        params,
        args,
        where_clause: where_clause
            .map(|clause| clause.to_token_stream().to_string())
            .unwrap_or_default(),
    }
}

fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|text| text.lines().map(block_margin_stripped).collect::<Vec<_>>())
        .collect()
}

/// Drops the ` * ` margin of a `/** ... */` line that carries a directive.
fn block_margin_stripped(line: &str) -> String {
    line.trim_start()
        .strip_prefix('*')
        .filter(|rest| rest.trim_start().starts_with(DIRECTIVE_PREFIX))
        .unwrap_or(line)
        .to_owned()
}

/// Joins every `#[accessor(...)]` attribute into one annotation body.
///
/// Values are re-quoted so raw strings and escapes reach the directive
/// parser intact. Attributes that do not parse are ignored.
fn annotation(attrs: &[Attribute]) -> Option<String> {
    let entries: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident(ANNOTATION_ATTRIBUTE))
        .filter_map(|attr| match annotation_entries(attr) {
            Ok(entries) => Some(entries),
            Err(err) => {
                trace!(%err, "ignoring malformed accessor attribute");
                None
            }
        })
        .flatten()
        .collect();
    (!entries.is_empty()).then(|| entries.join(", "))
}

fn annotation_entries(attr: &Attribute) -> syn::Result<Vec<String>> {
    let mut entries = Vec::new();
    attr.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .ok_or_else(|| meta.error("expected a plain key"))?;
        if meta.input.peek(Token![=]) {
            let value = match meta.value()?.parse::<Lit>()? {
                Lit::Str(text) => text.value(),
                Lit::Bool(flag) => flag.value.to_string(),
                other => other.to_token_stream().to_string(),
            };
            entries.push(format!("{key}=\"{}\"", escape(&value)));
        } else {
            entries.push(key);
        }
        Ok(())
    })?;
    Ok(entries)
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn derives_accessors(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .any(|attr| {
            attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .is_ok_and(|paths| {
                    paths.iter().any(|path| {
                        path.segments
                            .last()
                            .is_some_and(|segment| segment.ident == DERIVE_NAME)
                    })
                })
        })
}
