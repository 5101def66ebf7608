//! Procedural macros for `accessor_gen`.
//!
//! `#[derive(Accessors)]` reads `accessor:` directives from the struct's doc
//! comments and `#[accessor(...)]` attributes on its fields, then expands to
//! the same getters, setters and initializer that `cargo accessors` writes
//! to disk. Command-level defaults do not exist at compile time, so only the
//! directives on the struct itself take effect.
//!
//! Structs whose accessors `cargo accessors` writes instead derive
//! [`AccessorFields`], which expands to nothing and only registers the
//! `accessor` field attribute.

use accessor_gen::{GlobalDefaults, generate_record, record_from_derive};
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro generating accessors from `accessor` directives.
///
/// ```
/// use accessor_gen_macros::Accessors;
///
/// /// accessor:all(getter, get_prefix=Get)
/// #[derive(Default, Accessors)]
/// struct Point {
///     x: i32,
///     #[accessor(getter = "-")]
///     y: i32,
/// }
///
/// let point = Point { x: 3, ..Point::default() };
/// assert_eq!(point.GetX(), 3);
/// assert_eq!(point.y, 0);
/// ```
#[proc_macro_derive(Accessors, attributes(accessor))]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Registers the `accessor` field attribute without generating code.
///
/// Use this on structs handled by `cargo accessors` so their
/// `#[accessor(...)]` annotations compile.
///
/// ```
/// use accessor_gen_macros::AccessorFields;
///
/// /// accessor:all(getter)
/// #[derive(AccessorFields)]
/// struct User {
///     #[accessor(setter = "*")]
///     name: String,
/// }
///
/// let user = User { name: "ada".to_owned() };
/// assert_eq!(user.name, "ada");
/// ```
#[proc_macro_derive(AccessorFields, attributes(accessor))]
pub fn derive_accessor_fields(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let record =
        record_from_derive(input).map_err(|err| syn::Error::new_spanned(&input.ident, err))?;
    let code = generate_record(&record, &GlobalDefaults::default());
    syn::parse_str(&code).map_err(|err| {
        syn::Error::new_spanned(
            &input.ident,
            format!("generated accessors for `{}` do not parse: {err}", input.ident),
        )
    })
}
