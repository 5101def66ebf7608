//! Construction planning for the generated initializer.
//!
//! The initializer copies values from any object implementing the record's
//! source trait: one zero-argument accessor per participating field, each
//! fed into the matching setter in declaration order.

use crate::config::GlobalDefaults;
use crate::directive::find_directive;
use crate::model::RecordType;
use crate::naming::to_accessor_case;
use crate::policy::FieldResolution;

/// Name of the record-level construct directive.
pub const CONSTRUCT_DIRECTIVE: &str = "construct";
/// Initializer name used when none is given.
pub const DEFAULT_CONSTRUCTOR: &str = "construct";
/// Suffix appended to the record name to name its source trait.
pub const SOURCE_TRAIT_SUFFIX: &str = "FieldSource";

/// An explicit `Method(Type)` binding from a field's `construct` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructBinding {
    /// Existing method called with the source value.
    pub setter: String,
    /// Argument type of that method.
    pub ty: String,
}

impl ConstructBinding {
    /// Parses `Method(Type)`, returning `None` when malformed.
    ///
    /// ```
    /// use accessor_gen::construct::ConstructBinding;
    ///
    /// let binding = ConstructBinding::parse("set_pair((u8, u8))");
    /// assert_eq!(binding.map(|b| b.ty), Some("(u8, u8)".to_owned()));
    /// assert!(ConstructBinding::parse("set_age").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (method, rest) = raw.trim().split_once('(')?;
        let setter = method.trim();
        if setter.is_empty() || !setter.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
            return None;
        }
        let ty = rest.strip_suffix(')')?.trim();
        if ty.is_empty() {
            return None;
        }
        Some(Self {
            setter: setter.to_owned(),
            ty: ty.to_owned(),
        })
    }
}

/// Record-level initializer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructSettings {
    /// Initializer method name.
    pub method: String,
    /// Prefix for the source trait's accessor names.
    pub accessor_prefix: String,
    /// Name of the source trait.
    pub source_trait: String,
}

impl ConstructSettings {
    /// Resolves whether `record` gets an initializer, and how it is named.
    ///
    /// A record-level `accessor:construct(...)` directive enables it; without
    /// one, the global defaults may force it.
    #[must_use]
    pub fn resolve(record: &RecordType, global: &GlobalDefaults) -> Option<Self> {
        let default_source = format!("{}{SOURCE_TRAIT_SUFFIX}", record.name);
        if let Some(directive) = find_directive(&record.comments, CONSTRUCT_DIRECTIVE) {
            let non_empty = |key: &str| directive.lookup(key).filter(|value| !value.is_empty());
            return Some(Self {
                method: non_empty("name").unwrap_or(DEFAULT_CONSTRUCTOR).to_owned(),
                accessor_prefix: directive.lookup("prefix").unwrap_or_default().to_owned(),
                source_trait: non_empty("source").map_or(default_source, str::to_owned),
            });
        }
        if !global.forces_construct() {
            return None;
        }
        let method = if global.constructor.is_empty() {
            DEFAULT_CONSTRUCTOR.to_owned()
        } else {
            global.constructor.clone()
        };
        Some(Self {
            method,
            accessor_prefix: global.construct_prefix.clone(),
            source_trait: default_source,
        })
    }
}

/// One participating field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructEntry {
    /// Field identifier.
    pub field: String,
    /// Type the source accessor returns.
    pub ty: String,
    /// Method on the record that receives the value.
    pub setter: String,
}

/// The finished initializer plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructPlan {
    /// Initializer method name.
    pub method: String,
    /// Prefix for the source trait's accessor names.
    pub accessor_prefix: String,
    /// Name of the source trait.
    pub source_trait: String,
    /// Visibility of the initializer.
    pub visibility: String,
    /// Participating fields in declaration order.
    pub entries: Vec<ConstructEntry>,
}

impl ConstructPlan {
    /// Name of the source accessor for `field`.
    #[must_use]
    pub fn accessor_for(&self, field: &str) -> String {
        format!("{}{}", self.accessor_prefix, to_accessor_case(field))
    }
}

/// Accumulates participating fields as they are resolved.
#[derive(Debug)]
pub struct ConstructPlanner {
    settings: ConstructSettings,
    visibility: String,
    entries: Vec<ConstructEntry>,
}

impl ConstructPlanner {
    /// Starts a plan for a record.
    #[must_use]
    pub fn new(settings: ConstructSettings, visibility: impl Into<String>) -> Self {
        Self {
            settings,
            visibility: visibility.into(),
            entries: Vec::new(),
        }
    }

    /// Adds a field if it participates.
    ///
    /// An explicit construct binding takes precedence over the resolved
    /// setter; fields with neither are skipped.
    pub fn push(&mut self, resolution: &FieldResolution) {
        let entry = match (&resolution.construct, &resolution.setter) {
            (Some(binding), _) => ConstructEntry {
                field: resolution.field.clone(),
                ty: binding.ty.clone(),
                setter: binding.setter.clone(),
            },
            (None, Some(setter)) => ConstructEntry {
                field: resolution.field.clone(),
                ty: resolution.ty.clone(),
                setter: setter.name.clone(),
            },
            (None, None) => return,
        };
        self.entries.push(entry);
    }

    /// Completes the plan. Zero entries is a valid, trivial plan.
    #[must_use]
    pub fn finish(self) -> ConstructPlan {
        ConstructPlan {
            method: self.settings.method,
            accessor_prefix: self.settings.accessor_prefix,
            source_trait: self.settings.source_trait,
            visibility: self.visibility,
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::policy::{TypeDefaults, resolve_field};
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    #[rstest]
    #[case("SetAge(u8)", "SetAge", "u8")]
    #[case(" set_map ( HashMap<String, Vec<u8>> ) ", "set_map", "HashMap<String, Vec<u8>>")]
    #[case("set_fn(fn(u8) -> u8)", "set_fn", "fn(u8) -> u8")]
    fn parses_bindings(#[case] raw: &str, #[case] setter: &str, #[case] ty: &str) -> Result<()> {
        let binding = ConstructBinding::parse(raw).ok_or_else(|| anyhow!("{raw:?} rejected"))?;
        ensure!(binding.setter == setter, "setter was {}", binding.setter);
        ensure!(binding.ty == ty, "type was {}", binding.ty);
        Ok(())
    }

    #[rstest]
    #[case("SetAge")]
    #[case("SetAge()")]
    #[case("(u8)")]
    #[case("Set Age(u8)")]
    #[case("SetAge(u8")]
    fn rejects_malformed_bindings(#[case] raw: &str) {
        assert!(ConstructBinding::parse(raw).is_none(), "{raw:?} accepted");
    }

    #[test]
    fn directive_settings_use_defaults_for_missing_keys() -> Result<()> {
        let record = RecordType::new("User").with_comment("accessor:construct()");
        let settings = ConstructSettings::resolve(&record, &GlobalDefaults::default())
            .ok_or_else(|| anyhow!("construct directive ignored"))?;
        ensure!(settings.method == DEFAULT_CONSTRUCTOR, "method {}", settings.method);
        ensure!(settings.accessor_prefix.is_empty(), "unexpected prefix");
        ensure!(settings.source_trait == "UserFieldSource", "trait {}", settings.source_trait);
        Ok(())
    }

    #[test]
    fn directive_settings_override_names() -> Result<()> {
        let record = RecordType::new("User")
            .with_comment("accessor:construct(name=fill_from, prefix=Get, source=UserSource)");
        let settings = ConstructSettings::resolve(&record, &GlobalDefaults::default())
            .ok_or_else(|| anyhow!("construct directive ignored"))?;
        ensure!(settings.method == "fill_from", "method {}", settings.method);
        ensure!(settings.accessor_prefix == "Get", "prefix {}", settings.accessor_prefix);
        ensure!(settings.source_trait == "UserSource", "trait {}", settings.source_trait);
        Ok(())
    }

    #[test]
    fn no_directive_and_no_global_flag_means_no_plan() {
        let record = RecordType::new("User");
        assert!(ConstructSettings::resolve(&record, &GlobalDefaults::default()).is_none());
    }

    #[test]
    fn global_constructor_name_forces_plan() -> Result<()> {
        let record = RecordType::new("User");
        let global = GlobalDefaults {
            constructor: "from_source".to_owned(),
            construct_prefix: "Src".to_owned(),
            ..GlobalDefaults::default()
        };
        let settings = ConstructSettings::resolve(&record, &global)
            .ok_or_else(|| anyhow!("global constructor ignored"))?;
        ensure!(settings.method == "from_source", "method {}", settings.method);
        ensure!(settings.accessor_prefix == "Src", "prefix {}", settings.accessor_prefix);
        Ok(())
    }

    #[test]
    fn directive_beats_global_settings() -> Result<()> {
        let record = RecordType::new("User").with_comment("accessor:construct(name=local)");
        let global = GlobalDefaults {
            constructor: "global".to_owned(),
            construct_prefix: "G".to_owned(),
            ..GlobalDefaults::default()
        };
        let settings = ConstructSettings::resolve(&record, &global)
            .ok_or_else(|| anyhow!("construct directive ignored"))?;
        ensure!(settings.method == "local", "method {}", settings.method);
        ensure!(settings.accessor_prefix.is_empty(), "global prefix leaked");
        Ok(())
    }

    #[test]
    fn planner_keeps_declaration_order_and_prefers_bindings() -> Result<()> {
        let defaults = TypeDefaults {
            enabled: true,
            setters: true,
            set_prefix: "Set".to_owned(),
            ..TypeDefaults::default()
        };
        let fields = [
            Field::new("id", "u64"),
            Field::new("name", "String").with_annotation("setter=-"),
            Field::new("age", "u8").with_annotation(r#"construct="assign_age(u16)""#),
            Field::new("email", "String"),
        ];
        let settings = ConstructSettings {
            method: "construct".to_owned(),
            accessor_prefix: "Get".to_owned(),
            source_trait: "UserFieldSource".to_owned(),
        };
        let mut planner = ConstructPlanner::new(settings, "pub");
        for field in &fields {
            planner.push(&resolve_field(field, &defaults));
        }
        let plan = planner.finish();
        let observed: Vec<(&str, &str, &str)> = plan
            .entries
            .iter()
            .map(|e| (e.field.as_str(), e.ty.as_str(), e.setter.as_str()))
            .collect();
        ensure!(
            observed
                == vec![
                    ("id", "u64", "SetId"),
                    ("age", "u16", "assign_age"),
                    ("email", "String", "SetEmail"),
                ],
            "unexpected plan {observed:?}"
        );
        ensure!(plan.accessor_for("email") == "GetEmail", "wrong accessor name");
        Ok(())
    }

    #[test]
    fn empty_records_produce_trivial_plans() {
        let settings = ConstructSettings {
            method: "construct".to_owned(),
            accessor_prefix: String::new(),
            source_trait: "EmptyFieldSource".to_owned(),
        };
        let plan = ConstructPlanner::new(settings, "pub").finish();
        assert!(plan.entries.is_empty());
    }
}
