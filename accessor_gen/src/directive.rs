//! Parsing for the directive mini-language.
//!
//! A directive has the shape `name(key=value, flag, key="quoted, value")`.
//! Directives live either in comment lines prefixed with
//! [`DIRECTIVE_PREFIX`] or, for fields, in an annotation body that uses the
//! argument grammar alone.
//!
//! Parsing is tolerant: anything malformed is reported as `None` so callers
//! treat it exactly like an absent directive.
//!
//! Values may be double-quoted. Inside quotes `,`, `=`, `(` and `)` are
//! literal and `\"` or `\\` escape. Unquoted parentheses inside a body are
//! rejected, so `construct=SetAge(u8)` has to be written
//! `construct="SetAge(u8)"`.

use tracing::trace;

/// Prefix marking a comment line as carrying a directive.
pub const DIRECTIVE_PREFIX: &str = "accessor:";

/// A parsed directive: its name plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    args: Vec<(String, String)>,
}

impl Directive {
    /// Parses `name(args)`, returning `None` for malformed input.
    ///
    /// # Examples
    ///
    /// ```
    /// use accessor_gen::directive::Directive;
    ///
    /// let directive = Directive::parse("all(get_prefix=Get, setter)");
    /// let directive = directive.as_ref();
    /// assert_eq!(directive.map(Directive::name), Some("all"));
    /// assert_eq!(directive.and_then(|d| d.lookup("get_prefix")), Some("Get"));
    /// assert_eq!(directive.and_then(|d| d.lookup("setter")), Some(""));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (head, rest) = raw.trim().split_once('(')?;
        let name = head.trim();
        if !is_directive_name(name) {
            return None;
        }
        let body = rest.strip_suffix(')')?;
        let args = parse_args(body)?;
        Some(Self {
            name: name.to_owned(),
            args,
        })
    }

    /// Directive name, for example `all` or `construct`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered `(key, value)` arguments. Flags carry an empty value.
    #[must_use]
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    /// Returns the value of the first argument named `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        lookup(&self.args, key)
    }

    /// Reports whether an argument named `key` is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Linear scan over parsed arguments; the first matching key wins.
#[must_use]
pub fn lookup<'a>(args: &'a [(String, String)], key: &str) -> Option<&'a str> {
    args.iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| value.as_str())
}

/// Locates the directive called `name` in a block of comment lines.
///
/// Lines are trimmed before the prefix check. Lines that carry the prefix
/// but hold a different or malformed directive are skipped, so one block may
/// declare several directives and each is reported independently.
#[must_use]
pub fn find_directive(comments: &[String], name: &str) -> Option<Directive> {
    comments
        .iter()
        .flat_map(|comment| comment.lines())
        .filter_map(|line| line.trim().strip_prefix(DIRECTIVE_PREFIX))
        .filter_map(|raw| {
            let parsed = Directive::parse(raw);
            if parsed.is_none() {
                trace!(directive = raw, "ignoring malformed directive");
            }
            parsed
        })
        .find(|directive| directive.name == name)
}

/// Parses a boolean directive value.
///
/// A bare flag (empty value) counts as `true`. Unrecognised text yields
/// `None`.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses the comma-separated argument list of a directive body.
///
/// Returns `None` when the body is malformed: an unterminated quote, an
/// unquoted parenthesis, or an entry with a value but no key.
#[must_use]
pub fn parse_args(body: &str) -> Option<Vec<(String, String)>> {
    let mut entries = Vec::new();
    let mut current = Entry::default();
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => current.side().push_quoted(read_quoted(&mut chars)?),
            ',' => entries.push(std::mem::take(&mut current)),
            '=' if current.value.is_none() => current.value = Some(Segment::default()),
            '(' | ')' => return None,
            other => current.side().push_char(other),
        }
    }
    entries.push(current);

    let mut args = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(pair) = entry.finish()? {
            args.push(pair);
        }
    }
    Some(args)
}

fn is_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

fn read_quoted(chars: &mut std::str::Chars<'_>) -> Option<String> {
    let mut text = String::new();
    loop {
        match chars.next()? {
            '"' => return Some(text),
            '\\' => text.push(chars.next()?),
            other => text.push(other),
        }
    }
}

#[derive(Default)]
struct Entry {
    key: Segment,
    value: Option<Segment>,
}

impl Entry {
    fn side(&mut self) -> &mut Segment {
        self.value.as_mut().unwrap_or(&mut self.key)
    }

    /// `Some(None)` for an empty entry, `None` for a malformed one.
    fn finish(self) -> Option<Option<(String, String)>> {
        let key = self.key.finish();
        match self.value {
            None if key.is_empty() => Some(None),
            None => Some(Some((key, String::new()))),
            Some(_) if key.is_empty() => None,
            Some(value) => Some(Some((key, value.finish()))),
        }
    }
}

/// Text assembled from unquoted runs and quoted strings. Only the unquoted
/// ends are trimmed.
#[derive(Default)]
struct Segment {
    pieces: Vec<(String, bool)>,
}

impl Segment {
    fn push_char(&mut self, ch: char) {
        match self.pieces.last_mut() {
            Some((text, false)) => text.push(ch),
            _ => self.pieces.push((ch.to_string(), false)),
        }
    }

    fn push_quoted(&mut self, text: String) {
        self.pieces.push((text, true));
    }

    fn finish(self) -> String {
        let last = self.pieces.len().saturating_sub(1);
        self.pieces
            .into_iter()
            .enumerate()
            .map(|(index, (text, quoted))| {
                if quoted {
                    return text;
                }
                let mut piece = text.as_str();
                if index == 0 {
                    piece = piece.trim_start();
                }
                if index == last {
                    piece = piece.trim_end();
                }
                piece.to_owned()
            })
            .collect()
    }
}
