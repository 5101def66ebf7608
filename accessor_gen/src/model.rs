//! Record-type descriptors consumed by the generator.
//!
//! A [`RecordType`] is what a declaration source hands over: the type's name
//! and generic parameters rendered as text, its attached comment lines, and
//! its fields in declaration order. The generator never inspects types
//! semantically; every type signature is carried verbatim.

/// Generic parameters of a record, rendered as source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericParams {
    /// Parameter declarations including bounds, without angle brackets
    /// (`K: Ord, V`).
    pub params: String,
    /// Parameter names used when naming the type (`K`, `V`).
    pub args: Vec<String>,
    /// The `where` clause, including the keyword, or empty.
    pub where_clause: String,
}

impl GenericParams {
    /// Builds parameters without bounds from a list of names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            params: args.join(", "),
            args,
            where_clause: String::new(),
        }
    }

    /// Reports whether the record has no generic parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// `<K: Ord, V>` for `impl`/`trait` headers, or an empty string.
    #[must_use]
    pub fn declaration(&self) -> String {
        if self.params.trim().is_empty() {
            String::new()
        } else {
            format!("<{}>", self.params)
        }
    }

    /// `<K, V>` for naming the type, or an empty string.
    #[must_use]
    pub fn arguments(&self) -> String {
        if self.args.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.args.join(", "))
        }
    }

    /// The `where` clause preceded by a space, or an empty string.
    #[must_use]
    pub fn where_suffix(&self) -> String {
        if self.where_clause.trim().is_empty() {
            String::new()
        } else {
            format!(" {}", self.where_clause.trim())
        }
    }
}

/// One field of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// Field identifier as declared.
    pub name: String,
    /// Declared type signature, verbatim.
    pub ty: String,
    /// Annotation body such as `getter="*", setter="*"`.
    pub annotation: Option<String>,
    /// Attached comment lines.
    pub comments: Vec<String>,
}

impl Field {
    /// Creates a field with no annotation or comments.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotation: None,
            comments: Vec::new(),
        }
    }

    /// Attaches an annotation body.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Appends a comment line.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

/// A named record type with ordered fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordType {
    /// Type identifier.
    pub name: String,
    /// Generic parameters, if any.
    pub generics: GenericParams,
    /// Attached comment lines carrying type-level directives.
    pub comments: Vec<String>,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl RecordType {
    /// Creates an empty, non-generic record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replaces the generic parameters.
    #[must_use]
    pub fn with_generics(mut self, generics: GenericParams) -> Self {
        self.generics = generics;
        self
    }

    /// Appends a comment line.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Name with generic arguments, e.g. `Pair<K, V>`. Used for ordering.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}{}", self.name, self.generics.arguments())
    }
}
