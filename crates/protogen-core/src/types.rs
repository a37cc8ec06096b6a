//! Field type resolution for target languages.
//!
//! Each supported output language supplies three things: a lexicon for
//! protobuf scalar wire types, the native date/time type used for
//! `google.protobuf.Timestamp`, and a format for repeated fields. The
//! resolution algorithm in [`TypeResolver::resolve`] is shared by all of them.
//!
//! # Type Mappings
//!
//! | Wire type | TypeScript | Dart | Go |
//! |-----------|------------|------|----|
//! | `string` | `string` | `String` | `string` |
//! | integer types | `number` | `int` | `int` |
//! | `float` | `number` | `double` | `float32` |
//! | `double` | `number` | `double` | `float64` |
//! | `bool` | `boolean` | `bool` | `bool` |
//! | `google.protobuf.Timestamp` | `Date` | `DateTime` | `time.Time` |
//! | repeated `T` | `T[]` | `List<T>` | `[]T` |
//!
//! `bytes`, enums and groups have no mapping and fail with [`UnresolvedType`].

use crate::error::GenerateError;
use crate::model::ITEM_MARKER;
use prost_types::FieldDescriptorProto;
use prost_types::field_descriptor_proto::{Label, Type};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fully qualified name of the well-known timestamp message.
pub const TIMESTAMP_TYPE_NAME: &str = ".google.protobuf.Timestamp";

/// A field whose wire type cannot be expressed in the active language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {language} type for field `{field}` of wire type {wire_type}")]
pub struct UnresolvedType {
    pub field: String,
    pub wire_type: String,
    pub language: String,
}

/// Supported output languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Dart,
    Go,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::TypeScript, Language::Dart, Language::Go];

    /// The option value selecting this language
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Dart => "dart",
            Language::Go => "go",
        }
    }

    /// Map a scalar wire type to this language's type name.
    pub fn scalar(self, ty: Type) -> Option<&'static str> {
        use Type::*;

        let name = match (self, ty) {
            (Language::TypeScript, String) => "string",
            (Language::TypeScript, Float | Double) => "number",
            (Language::TypeScript, Bool) => "boolean",

            (Language::Dart, String) => "String",
            (Language::Dart, Float | Double) => "double",
            (Language::Dart, Bool) => "bool",

            (Language::Go, String) => "string",
            (Language::Go, Float) => "float32",
            (Language::Go, Double) => "float64",
            (Language::Go, Bool) => "bool",

            (lang, ty) if is_integer(ty) => lang.integer_type(),
            _ => return None,
        };

        Some(name)
    }

    fn integer_type(self) -> &'static str {
        match self {
            Language::TypeScript => "number",
            Language::Dart | Language::Go => "int",
        }
    }

    /// Native date/time type used for `google.protobuf.Timestamp` fields.
    pub fn timestamp_type(self) -> &'static str {
        match self {
            Language::TypeScript => "Date",
            Language::Dart => "DateTime",
            Language::Go => "time.Time",
        }
    }

    /// Format for repeated fields; `{}` is replaced by the element type.
    pub fn repeated_format(self) -> &'static str {
        match self {
            Language::TypeScript => "{}[]",
            Language::Dart => "List<{}>",
            Language::Go => "[]{}",
        }
    }

    /// Wrap `base` once in this language's collection syntax.
    pub fn wrap_repeated(self, base: &str) -> String {
        self.repeated_format().replacen("{}", base, 1)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| GenerateError::config("lang", format!("has unknown language `{s}`")))
    }
}

fn is_integer(ty: Type) -> bool {
    matches!(
        ty,
        Type::Int32
            | Type::Int64
            | Type::Uint32
            | Type::Uint64
            | Type::Sint32
            | Type::Sint64
            | Type::Fixed32
            | Type::Fixed64
            | Type::Sfixed32
            | Type::Sfixed64
    )
}

/// Strip the scope prefix from a fully qualified type name.
///
/// Item messages are referenced by their own local name, so a leading item
/// marker on the last component is dropped too.
///
/// ```
/// use protogen_core::types::bare_type_name;
///
/// assert_eq!(bare_type_name(".shop.Order"), "Order");
/// assert_eq!(bare_type_name(".shop.Order.__Item"), "Item");
/// ```
pub fn bare_type_name(type_name: &str) -> &str {
    let last = type_name.rsplit('.').next().unwrap_or(type_name);
    last.strip_prefix(ITEM_MARKER).unwrap_or(last)
}

/// Returns true if the field has the REPEATED label
pub fn is_repeated(field: &FieldDescriptorProto) -> bool {
    field.label() == Label::Repeated
}

/// Decode the field's wire type, if it is set and known.
pub fn wire_type(field: &FieldDescriptorProto) -> Option<Type> {
    field.r#type.and_then(|raw| Type::try_from(raw).ok())
}

/// Resolves protobuf field types to type names of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeResolver {
    language: Language,
}

impl TypeResolver {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Resolve the type name to emit for `field`.
    ///
    /// Repeated fields are wrapped exactly once in the language's collection
    /// syntax.
    pub fn resolve(&self, field: &FieldDescriptorProto) -> Result<String, UnresolvedType> {
        let base = self.resolve_base(field)?;

        if is_repeated(field) {
            Ok(self.language.wrap_repeated(&base))
        } else {
            Ok(base)
        }
    }

    fn resolve_base(&self, field: &FieldDescriptorProto) -> Result<String, UnresolvedType> {
        match wire_type(field) {
            Some(Type::Message) => Ok(self.message_type(field.type_name())),
            Some(ty) => self
                .language
                .scalar(ty)
                .map(str::to_string)
                .ok_or_else(|| self.unresolved(field, wire_type_label(ty))),
            None => {
                let label = match field.r#type {
                    Some(raw) => format!("unknown({raw})"),
                    None => "unset".to_string(),
                };
                Err(self.unresolved(field, label))
            }
        }
    }

    fn message_type(&self, type_name: &str) -> String {
        if type_name == TIMESTAMP_TYPE_NAME {
            self.language.timestamp_type().to_string()
        } else {
            bare_type_name(type_name).to_string()
        }
    }

    fn unresolved(&self, field: &FieldDescriptorProto, wire_type: String) -> UnresolvedType {
        UnresolvedType {
            field: field.name().to_string(),
            wire_type,
            language: self.language.to_string(),
        }
    }
}

/// `TYPE_BYTES` -> `bytes`
fn wire_type_label(ty: Type) -> String {
    let name = ty.as_str_name();
    name.strip_prefix("TYPE_").unwrap_or(name).to_lowercase()
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
