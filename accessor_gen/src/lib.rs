//! Declarative accessor generation for Rust structs.
//!
//! Structs opt in through `accessor:` directives in their doc comments and
//! `#[accessor(...)]` attributes on their fields. This crate resolves those
//! declarations into getters, setters and an optional initializer that copies
//! values from a source trait, then renders them as Rust source text.
//!
//! The `Accessors` derive in `accessor_gen_macros` and the `cargo accessors`
//! command both feed [`RecordType`] descriptors into [`generate`] or
//! [`generate_record`].

pub mod config;
pub mod construct;
pub mod directive;
pub mod emit;
mod generate;
pub mod model;
pub mod naming;
pub mod policy;
pub mod scan;

pub use config::GlobalDefaults;
pub use construct::{ConstructBinding, ConstructPlan, ConstructSettings};
pub use directive::{DIRECTIVE_PREFIX, Directive};
pub use generate::{generate, generate_record};
pub use model::{Field, GenericParams, RecordType};
pub use policy::{FieldResolution, TypeDefaults, resolve_field};
pub use scan::{ScanError, record_from_derive, record_from_item, scan_source};
