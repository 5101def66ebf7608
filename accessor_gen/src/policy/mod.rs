//! Per-field accessor policy.
//!
//! Resolution runs in two steps. [`TypeDefaults::resolve`] computes the
//! record-wide defaults once, from the record's `accessor:all(...)`
//! directive or, when that directive is missing, from [`GlobalDefaults`].
//! [`resolve_field`] then merges those defaults with the field's own
//! directives, in this order, highest first:
//!
//! 1. an explicit opt-out (`-`) suppresses the accessor;
//! 2. an explicit name, or `*` to derive one from the field name;
//! 3. the record-wide default, `prefix + to_accessor_case(field)`;
//! 4. nothing.
//!
//! Resolution never fails. Missing or malformed directives simply fall
//! through to the next layer.

use tracing::trace;

use crate::config::GlobalDefaults;
use crate::construct::ConstructBinding;
use crate::directive::{self, Directive, find_directive, parse_bool};
use crate::model::{Field, RecordType};
use crate::naming::to_accessor_case;


/// Name of the record-level defaults directive.
pub const ALL_DIRECTIVE: &str = "all";
/// Name of the field-level directive carried in comments.
pub const FIELD_DIRECTIVE: &str = "field";
/// Verb prepended to setter names derived with `*`.
pub const SETTER_VERB: &str = "Set";
/// Visibility used when no directive sets one.
pub const DEFAULT_VISIBILITY: &str = "pub";

const WILDCARD: &str = "*";
const OPT_OUT: &str = "-";
const REFERENCE_MODIFIERS: [&str; 4] = ["ref", "ptr", "reference", "pointer"];

/// What a field-level directive asks for one accessor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessorSpec {
    /// Use exactly this method name.
    Explicit(String),
    /// Derive the method name from the field name.
    Derive,
    /// Never generate this accessor.
    Suppressed,
    /// No field-level instruction; defer to the record defaults.
    #[default]
    Unset,
}

impl AccessorSpec {
    /// Parses the leading token of a `getter`/`setter` value.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "" => Self::Unset,
            WILDCARD => Self::Derive,
            OPT_OUT => Self::Suppressed,
            name => Self::Explicit(name.to_owned()),
        }
    }
}

/// Field-level directives gathered from the annotation and comments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDirectives {
    /// Getter instruction.
    pub getter: AccessorSpec,
    /// Whether the getter returns a reference.
    pub by_ref: bool,
    /// Setter instruction.
    pub setter: AccessorSpec,
    /// Explicit construct binding, when well formed.
    pub construct: Option<ConstructBinding>,
    /// Visibility override for this field's accessors.
    pub visibility: Option<String>,
}

impl FieldDirectives {
    /// Collects directives for `field`.
    ///
    /// Annotation arguments are consulted before any `accessor:field(...)`
    /// comment directive, so the annotation wins when both name a key.
    #[must_use]
    pub fn parse(field: &Field) -> Self {
        let mut args = field
            .annotation
            .as_deref()
            .and_then(|raw| {
                let parsed = directive::parse_args(raw);
                if parsed.is_none() {
                    trace!(field = %field.name, annotation = raw, "ignoring malformed annotation");
                }
                parsed
            })
            .unwrap_or_default();
        if let Some(from_comment) = find_directive(&field.comments, FIELD_DIRECTIVE) {
            args.extend(from_comment.args().iter().cloned());
        }
        Self::from_args(&args)
    }

    fn from_args(args: &[(String, String)]) -> Self {
        let (getter, modifier) = directive::lookup(args, "getter").map_or(
            (AccessorSpec::Unset, false),
            |value| {
                let mut parts = value.split(',');
                let spec = accessor_spec("getter", parts.next().unwrap_or_default());
                let marked = parts.any(|part| REFERENCE_MODIFIERS.contains(&part.trim()));
                (spec, marked)
            },
        );
        // Unquoted `getter=Name,ref` splits the modifier into its own entry.
        let by_ref = modifier
            || args
                .iter()
                .any(|(key, value)| value.is_empty() && REFERENCE_MODIFIERS.contains(&key.as_str()));
        let setter = directive::lookup(args, "setter").map_or(AccessorSpec::Unset, |value| {
            accessor_spec("setter", value.split(',').next().unwrap_or_default())
        });
        let construct = directive::lookup(args, "construct").and_then(ConstructBinding::parse);
        let visibility = directive::lookup(args, "vis")
            .map(str::trim)
            .filter(|vis| !vis.is_empty())
            .map(str::to_owned);
        Self {
            getter,
            by_ref,
            setter,
            construct,
            visibility,
        }
    }
}

fn accessor_spec(key: &str, token: &str) -> AccessorSpec {
    let spec = AccessorSpec::parse(token);
    if spec == AccessorSpec::Unset {
        trace!(key, "accessor key without a name defers to record defaults");
    }
    spec
}

/// Record-wide accessor defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefaults {
    /// Whether defaults apply to every field at all.
    pub enabled: bool,
    /// Generate getters for fields without a getter directive.
    pub getters: bool,
    /// Generate setters for fields without a setter directive.
    pub setters: bool,
    /// Prefix for default getter names.
    pub get_prefix: String,
    /// Prefix for default setter names.
    pub set_prefix: String,
    /// Visibility for generated accessors.
    pub visibility: String,
}

impl Default for TypeDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            getters: false,
            setters: false,
            get_prefix: String::new(),
            set_prefix: String::new(),
            visibility: DEFAULT_VISIBILITY.to_owned(),
        }
    }
}

impl TypeDefaults {
    /// Resolves the defaults for `record`.
    ///
    /// An `accessor:all(...)` directive is authoritative when present; the
    /// global defaults only fill in for records without one.
    #[must_use]
    pub fn resolve(record: &RecordType, global: &GlobalDefaults) -> Self {
        find_directive(&record.comments, ALL_DIRECTIVE).map_or_else(
            || Self {
                enabled: global.getter || global.setter,
                getters: global.getter,
                setters: global.setter,
                get_prefix: global.get_prefix.clone(),
                set_prefix: global.set_prefix.clone(),
                visibility: DEFAULT_VISIBILITY.to_owned(),
            },
            |all| Self::from_directive(&all),
        )
    }

    fn from_directive(all: &Directive) -> Self {
        let flag = |key: &str| all.lookup(key).and_then(parse_bool).unwrap_or(false);
        Self {
            enabled: true,
            getters: flag("getter"),
            setters: flag("setter"),
            get_prefix: all.lookup("get_prefix").unwrap_or_default().to_owned(),
            set_prefix: all.lookup("set_prefix").unwrap_or_default().to_owned(),
            visibility: all
                .lookup("vis")
                .map(str::trim)
                .filter(|vis| !vis.is_empty())
                .unwrap_or(DEFAULT_VISIBILITY)
                .to_owned(),
        }
    }
}

/// A getter to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Getter {
    /// Method name.
    pub name: String,
    /// Return `&T` instead of a clone of `T`.
    pub by_ref: bool,
}

/// A setter to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setter {
    /// Method name.
    pub name: String,
}

/// Final accessor decision for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolution {
    /// Field identifier.
    pub field: String,
    /// Declared type, verbatim.
    pub ty: String,
    /// Visibility of the generated methods.
    pub visibility: String,
    /// Getter to generate, if any.
    pub getter: Option<Getter>,
    /// Setter to generate, if any.
    pub setter: Option<Setter>,
    /// Explicit construct binding, if any.
    pub construct: Option<ConstructBinding>,
}

impl FieldResolution {
    /// Whether the generated setter should be emitted.
    ///
    /// A field with an explicit construct binding points at a hand-written
    /// method, so no setter is emitted for it.
    #[must_use]
    pub const fn emits_setter(&self) -> bool {
        self.setter.is_some() && self.construct.is_none()
    }
}

/// Resolves the accessors for one field.
///
/// # Examples
///
/// ```
/// use accessor_gen::model::Field;
/// use accessor_gen::policy::{TypeDefaults, resolve_field};
///
/// let field = Field::new("cache", "Cache").with_annotation(r#"getter="GetCache,ref""#);
/// let resolution = resolve_field(&field, &TypeDefaults::default());
/// let getter = resolution.getter.as_ref().map(|g| (g.name.as_str(), g.by_ref));
/// assert_eq!(getter, Some(("GetCache", true)));
/// assert!(resolution.setter.is_none());
/// ```
#[must_use]
pub fn resolve_field(field: &Field, defaults: &TypeDefaults) -> FieldResolution {
    let directives = FieldDirectives::parse(field);
    let suffix = to_accessor_case(&field.name);

    let getter = match directives.getter {
        AccessorSpec::Suppressed => None,
        AccessorSpec::Explicit(name) => Some(Getter {
            name,
            by_ref: directives.by_ref,
        }),
        AccessorSpec::Derive => Some(Getter {
            name: suffix.clone(),
            by_ref: directives.by_ref,
        }),
        AccessorSpec::Unset => (defaults.enabled && defaults.getters).then(|| Getter {
            name: format!("{}{suffix}", defaults.get_prefix),
            by_ref: false,
        }),
    };

    let setter = match directives.setter {
        AccessorSpec::Suppressed => None,
        AccessorSpec::Explicit(name) => Some(Setter { name }),
        AccessorSpec::Derive => Some(Setter {
            name: format!("{SETTER_VERB}{suffix}"),
        }),
        AccessorSpec::Unset => (defaults.enabled && defaults.setters).then(|| Setter {
            name: format!("{}{suffix}", defaults.set_prefix),
        }),
    };

    FieldResolution {
        field: field.name.clone(),
        ty: field.ty.clone(),
        visibility: directives
            .visibility
            .unwrap_or_else(|| defaults.visibility.clone()),
        getter,
        setter,
        construct: directives.construct,
    }
}
