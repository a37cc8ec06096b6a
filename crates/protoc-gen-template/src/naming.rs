//! Naming helpers exposed to templates.
//!
//! Schemas use `snake_case` fields and `PascalCase` messages; templates
//! usually need something else. Every helper is registered as a minijinja
//! filter under its function name.
//!
//! | Input | Filter | Output |
//! |-------|--------|--------|
//! | `display_name` | [`to_camel_case`] | `DisplayName` |
//! | `display_name` | [`to_lower_camel_case`] | `displayName` |
//! | `display_name` | [`to_pascal_case`] | `DisplayName` |
//! | `DisplayName` | [`to_snake_case`] | `display_name` |
//! | `DisplayName` | [`to_kebab_case`] | `display-name` |
//! | `Order` | [`to_plural`] | `Orders` |
//! | `categories` | [`to_singular`] | `category` |
//! | `OrderRequest` | [`has_suffix`]`("Request")` | `true` |
//!
//! `to_camel_case` is upper camel case; `to_lower_camel_case` starts with a
//! lowercase letter.

use convert_case::{Case, Casing};
use minijinja::Environment;

/// Convert to CamelCase with a leading capital.
///
/// ```
/// use protoc_gen_template::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("display_name"), "DisplayName");
/// assert_eq!(to_camel_case("orderItem"), "OrderItem");
/// ```
pub fn to_camel_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Convert to lowerCamelCase.
///
/// ```
/// use protoc_gen_template::naming::to_lower_camel_case;
///
/// assert_eq!(to_lower_camel_case("display_name"), "displayName");
/// assert_eq!(to_lower_camel_case("OrderItem"), "orderItem");
/// ```
pub fn to_lower_camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// Convert to PascalCase; same as [`to_camel_case`].
///
/// ```
/// use protoc_gen_template::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("display_name"), "DisplayName");
/// assert_eq!(to_pascal_case("order-item"), "OrderItem");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Convert to snake_case.
pub fn to_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Convert to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    s.to_case(Case::Kebab)
}

/// Plural form of an English word.
pub fn to_plural(s: &str) -> String {
    pluralizer::pluralize(s, 2, false)
}

/// Singular form of an English word.
pub fn to_singular(s: &str) -> String {
    pluralizer::pluralize(s, 1, false)
}

pub fn contains(s: &str, needle: &str) -> bool {
    s.contains(needle)
}

pub fn has_prefix(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

pub fn has_suffix(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

/// Register every helper as a filter of `env`.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("to_camel_case", to_camel_case);
    env.add_filter("to_lower_camel_case", to_lower_camel_case);
    env.add_filter("to_pascal_case", to_pascal_case);
    env.add_filter("to_snake_case", to_snake_case);
    env.add_filter("to_kebab_case", to_kebab_case);
    env.add_filter("to_plural", to_plural);
    env.add_filter("to_singular", to_singular);
    env.add_filter("contains", contains);
    env.add_filter("has_prefix", has_prefix);
    env.add_filter("has_suffix", has_suffix);
}
