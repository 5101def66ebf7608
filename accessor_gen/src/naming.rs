//! Identifier normalisation for generated method names.

/// How the first letter of a normalised identifier is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstLetter {
    /// Force the first letter to uppercase (`user_name` → `UserName`).
    #[default]
    Upper,
    /// Leave the first letter as written (`user_name` → `userName`).
    Keep,
}

/// Converts a field name into the `PascalCase` suffix used for accessor
/// names.
///
/// # Examples
///
/// ```
/// use accessor_gen::naming::to_accessor_case;
///
/// assert_eq!(to_accessor_case("user_name"), "UserName");
/// assert_eq!(to_accessor_case("kebab-case id"), "KebabCaseId");
/// assert_eq!(to_accessor_case("ipv4addr"), "Ipv4Addr");
/// ```
#[must_use]
pub fn to_accessor_case(name: &str) -> String {
    to_accessor_case_with(name, FirstLetter::Upper)
}

/// Normalises `name` with explicit control over the first letter.
///
/// A letter that follows a digit or one of the separators `_`, `-`, `.` or
/// space is uppercased. Separators are dropped and digits are kept. Any
/// other punctuation is discarded without affecting capitalisation. A raw
/// identifier prefix (`r#`) is ignored.
///
/// Uppercasing keeps only the letters a character expands to, so combining
/// marks never reach the output and a second pass changes nothing.
#[must_use]
pub fn to_accessor_case_with(name: &str, first: FirstLetter) -> String {
    let trimmed = name.trim();
    let ident = trimmed.strip_prefix("r#").unwrap_or(trimmed);
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = first == FirstLetter::Upper;
    for ch in ident.chars() {
        if ch.is_alphabetic() {
            let before = out.len();
            if upper_next {
                out.extend(ch.to_uppercase().filter(|upper| upper.is_alphabetic()));
            } else {
                out.push(ch);
            }
            upper_next = upper_next && out.len() == before;
        } else if ch.is_ascii_digit() {
            out.push(ch);
            upper_next = true;
        } else if is_separator(ch) {
            upper_next = true;
        }
    }
    out
}

const fn is_separator(ch: char) -> bool {
    matches!(ch, '_' | ' ' | '-' | '.')
}
