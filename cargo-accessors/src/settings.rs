//! Layered settings for one generation run.
//!
//! Values are merged lowest first: built-in defaults, the configuration
//! file, `ACCESSORS_*` environment variables, then flags given on the
//! command line.

use accessor_gen::GlobalDefaults;
use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Args;
use crate::error::AccessorsError;

/// Configuration file read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = ".accessors.toml";
/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "ACCESSORS_";

/// Fully merged settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Source files to scan; every `.rs` file when empty.
    pub files: Vec<String>,
    /// Directory holding the annotated structs.
    pub dir: Utf8PathBuf,
    /// File the generated code is written to.
    pub output: Option<Utf8PathBuf>,
    /// Types to generate for; every struct when empty.
    pub types: Vec<String>,
    /// Command-level getter flag.
    pub getter: bool,
    /// Command-level getter prefix.
    pub get_prefix: String,
    /// Command-level setter flag.
    pub setter: bool,
    /// Command-level setter prefix.
    pub set_prefix: String,
    /// Command-level initializer flag.
    pub construct: bool,
    /// Command-level initializer name.
    pub constructor: String,
    /// Command-level source accessor prefix.
    pub construct_prefix: String,
    /// Predicate for a file-level `#![cfg(...)]` attribute.
    pub cfg: Option<String>,
    /// Omit the `use super::*;` prelude.
    pub no_prelude: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dir: Utf8PathBuf::from("."),
            output: None,
            types: Vec::new(),
            getter: false,
            get_prefix: String::new(),
            setter: false,
            set_prefix: String::new(),
            construct: false,
            constructor: String::new(),
            construct_prefix: String::new(),
            cfg: None,
            no_prelude: false,
        }
    }
}

impl Settings {
    /// Merges defaults, the configuration file, the environment and `args`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessorsError::MissingConfig`] when `--config-path` names a
    /// file that does not exist, and [`AccessorsError::Config`] when the
    /// merged values do not deserialise.
    pub fn load(args: &Args) -> Result<Self, AccessorsError> {
        let config_file = match &args.config_path {
            Some(path) if !path.is_file() => {
                return Err(AccessorsError::MissingConfig(path.clone()));
            }
            Some(path) => path.clone(),
            None => Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        let settings: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]))
            .merge(Serialized::defaults(args))
            .extract()?;
        debug!(config = %config_file, ?settings, "loaded settings");
        Ok(settings)
    }

    /// Checks constraints that span several settings.
    ///
    /// # Errors
    ///
    /// Returns [`AccessorsError::GlobalFlagsNeedOneType`] when command-level
    /// accessor flags are set without exactly one target type.
    pub fn validate(&self) -> Result<(), AccessorsError> {
        if self.global_defaults().generates_anything() && self.types.len() != 1 {
            return Err(AccessorsError::GlobalFlagsNeedOneType);
        }
        Ok(())
    }

    /// The configured output file.
    ///
    /// # Errors
    ///
    /// Returns [`AccessorsError::MissingOutput`] when none was given.
    pub fn output_path(&self) -> Result<&Utf8Path, AccessorsError> {
        self.output.as_deref().ok_or(AccessorsError::MissingOutput)
    }

    /// Command-level defaults handed to the generator.
    #[must_use]
    pub fn global_defaults(&self) -> GlobalDefaults {
        GlobalDefaults {
            getter: self.getter,
            get_prefix: self.get_prefix.clone(),
            setter: self.setter,
            set_prefix: self.set_prefix.clone(),
            construct: self.construct,
            constructor: self.constructor.clone(),
            construct_prefix: self.construct_prefix.clone(),
        }
    }
}
