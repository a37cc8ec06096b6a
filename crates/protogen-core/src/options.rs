//! Plugin options.
//!
//! protoc passes plugin options as a single parameter string:
//!
//! ```text
//! --template_opt=template=ts.j2,lang=typescript,output_path={{ message.name }}.ts,generate_type=message
//! ```
//!
//! Pairs are separated by `,`; the first `=` splits key and value. A
//! `config=<file>` pair loads the same keys from a TOML file first, and the
//! inline pairs override it:
//!
//! ```toml
//! template = "templates/model.ts.j2"
//! lang = "typescript"
//! output_path = "src/models/{{ message.name | to_snake_case }}.ts"
//! generate_type = "message"
//! enable_message_flatten = false
//! ```

use crate::builder::ModelBuilder;
use crate::error::{GenerateError, GenerateResult};
use crate::types::{Language, TypeResolver};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Unit of generation: what one render of the template receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateType {
    /// One output per message
    Message,
    /// One output per service
    Service,
    /// One output per service method
    Method,
    /// One output per file (or per merged model)
    File,
}

impl GenerateType {
    pub const ALL: [GenerateType; 4] = [
        GenerateType::Message,
        GenerateType::Service,
        GenerateType::Method,
        GenerateType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GenerateType::Message => "message",
            GenerateType::Service => "service",
            GenerateType::Method => "method",
            GenerateType::File => "file",
        }
    }
}

impl fmt::Display for GenerateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerateType {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenerateType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| {
                GenerateError::config("generate_type", format!("has unknown unit `{s}`"))
            })
    }
}

/// Validated options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// Template file rendered for every unit
    pub template: PathBuf,

    /// Output language; selects the type resolver
    pub language: Language,

    /// Template for the output path of every unit
    pub output_path: String,

    pub generate_type: GenerateType,

    /// Merge the models of all files into one (default: false)
    pub allow_merge: bool,

    /// Replace files that already exist (default: true)
    pub overwrite: bool,

    /// Promote every nested non-item message to the top level (default: true)
    pub enable_message_flatten: bool,
}

impl PluginOptions {
    /// Parse the protoc parameter string.
    pub fn from_parameter(parameter: &str) -> GenerateResult<Self> {
        let inline = RawOptions::from_parameter(parameter)?;

        let raw = match &inline.config {
            Some(path) => RawOptions::from_file(path)?.overlay(inline),
            None => inline,
        };

        raw.resolve()
    }

    /// Type resolver for the configured language
    pub fn resolver(&self) -> TypeResolver {
        TypeResolver::new(self.language)
    }

    /// Model builder honoring the flatten policy
    pub fn model_builder(&self) -> ModelBuilder {
        ModelBuilder::new(self.resolver(), self.enable_message_flatten)
    }
}

/// Options as written by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOptions {
    pub template: Option<String>,
    pub lang: Option<String>,
    pub output_path: Option<String>,
    pub generate_type: Option<String>,
    pub allow_merge: Option<bool>,
    pub overwrite: Option<bool>,
    pub enable_message_flatten: Option<bool>,

    /// TOML file with defaults; only honored inline
    #[serde(skip)]
    pub config: Option<String>,
}

impl RawOptions {
    /// Parse `key=value` pairs separated by commas.
    pub fn from_parameter(parameter: &str) -> GenerateResult<Self> {
        let mut raw = RawOptions::default();

        for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(GenerateError::config(pair, "has no value"));
            };
            raw.set(key.trim(), value.trim())?;
        }

        Ok(raw)
    }

    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerateError::config("config", format!("cannot read {}: {e}", path.display()))
        })?;

        Self::from_toml(&content)
    }

    /// Parse options from TOML
    pub fn from_toml(content: &str) -> GenerateResult<Self> {
        toml::from_str(content)
            .map_err(|e| GenerateError::config("config", format!("is not valid: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> GenerateResult<()> {
        match key {
            "template" => self.template = Some(value.to_string()),
            "lang" => self.lang = Some(value.to_string()),
            "output_path" => self.output_path = Some(value.to_string()),
            "generate_type" => self.generate_type = Some(value.to_string()),
            "allow_merge" => self.allow_merge = Some(parse_bool(key, value)?),
            "overwrite" => self.overwrite = Some(parse_bool(key, value)?),
            "enable_message_flatten" => {
                self.enable_message_flatten = Some(parse_bool(key, value)?)
            }
            "config" => self.config = Some(value.to_string()),
            _ => tracing::warn!(key, "ignoring unknown option"),
        }
        Ok(())
    }

    /// Layer `other` on top of `self`; options set in `other` win.
    pub fn overlay(self, other: RawOptions) -> RawOptions {
        RawOptions {
            template: other.template.or(self.template),
            lang: other.lang.or(self.lang),
            output_path: other.output_path.or(self.output_path),
            generate_type: other.generate_type.or(self.generate_type),
            allow_merge: other.allow_merge.or(self.allow_merge),
            overwrite: other.overwrite.or(self.overwrite),
            enable_message_flatten: other.enable_message_flatten.or(self.enable_message_flatten),
            config: other.config.or(self.config),
        }
    }

    /// Validate and apply defaults
    pub fn resolve(self) -> GenerateResult<PluginOptions> {
        let template = required("template", self.template)?;
        let language = required("lang", self.lang)?.parse()?;
        let output_path = required("output_path", self.output_path)?;
        let generate_type = required("generate_type", self.generate_type)?.parse()?;

        Ok(PluginOptions {
            template: PathBuf::from(template),
            language,
            output_path,
            generate_type,
            allow_merge: self.allow_merge.unwrap_or(false),
            overwrite: self.overwrite.unwrap_or(true),
            enable_message_flatten: self.enable_message_flatten.unwrap_or(true),
        })
    }
}

fn required(key: &str, value: Option<String>) -> GenerateResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GenerateError::config(key, "is required")),
    }
}

fn parse_bool(key: &str, value: &str) -> GenerateResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(GenerateError::config(
            key,
            format!("must be `true` or `false`, got `{other}`"),
        )),
    }
}
