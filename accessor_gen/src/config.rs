//! Command-level defaults supplied by the caller.

/// Lowest-precedence generation defaults.
///
/// These apply to a record only when it carries no `accessor:all(...)`
/// (for getters and setters) or no `accessor:construct(...)` (for the
/// initializer) directive. The value is immutable and passed explicitly into
/// every generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalDefaults {
    /// Generate a getter for every field.
    pub getter: bool,
    /// Prefix for derived getter names.
    pub get_prefix: String,
    /// Generate a setter for every field.
    pub setter: bool,
    /// Prefix for derived setter names.
    pub set_prefix: String,
    /// Generate the construct-from initializer.
    pub construct: bool,
    /// Initializer method name; a non-empty value also enables it.
    pub constructor: String,
    /// Prefix for the source trait's accessor names.
    pub construct_prefix: String,
}

impl GlobalDefaults {
    /// Reports whether any of these defaults would generate code.
    #[must_use]
    pub fn generates_anything(&self) -> bool {
        self.getter || self.setter || self.forces_construct()
    }

    /// Reports whether the initializer is forced on.
    #[must_use]
    pub fn forces_construct(&self) -> bool {
        self.construct || !self.constructor.is_empty()
    }
}
