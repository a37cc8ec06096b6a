//! Render dispatch.
//!
//! A [`FileModel`] is split into units according to the configured
//! [`GenerateType`]; each unit becomes one [`RenderContext`] that is passed to
//! both the content template and the output path template.
//!
//! # Template context
//!
//! | Variable | Present for | Type |
//! |----------|-------------|------|
//! | `package` | all units | string |
//! | `file` | all units | [`FileModel`] |
//! | `message` | `message` | [`MessageDescriptor`] |
//! | `service` | `service`, `method` | [`ServiceDescriptor`] |
//! | `method` | `method` | [`ServiceMethodDescriptor`] |

use crate::error::PluginError;
use crate::naming;
use crate::output::GeneratedFile;
use minijinja::Environment;
use protogen_core::{
    FileModel, GenerateType, MessageDescriptor, PluginOptions, ServiceDescriptor,
    ServiceMethodDescriptor,
};
use serde::Serialize;

/// Template input for one unit of generation.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub package: &'a str,
    pub file: &'a FileModel,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a MessageDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<&'a ServiceDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'a ServiceMethodDescriptor>,
}

impl<'a> RenderContext<'a> {
    fn file(file: &'a FileModel) -> Self {
        Self {
            package: &file.package,
            file,
            message: None,
            service: None,
            method: None,
        }
    }
}

/// Split `model` into render contexts, in model order.
pub fn units(model: &FileModel, unit: GenerateType) -> Vec<RenderContext<'_>> {
    let base = RenderContext::file(model);
    let base = &base;

    match unit {
        GenerateType::File => vec![base.clone()],
        GenerateType::Message => model
            .messages
            .iter()
            .map(|message| RenderContext {
                message: Some(message),
                ..base.clone()
            })
            .collect(),
        GenerateType::Service => model
            .services
            .iter()
            .map(|service| RenderContext {
                service: Some(service),
                ..base.clone()
            })
            .collect(),
        GenerateType::Method => model
            .services
            .iter()
            .flat_map(|service| {
                service.methods.iter().map(move |method| RenderContext {
                    service: Some(service),
                    method: Some(method),
                    ..base.clone()
                })
            })
            .collect(),
    }
}

const CONTENT_TEMPLATE: &str = "content";
const OUTPUT_PATH_TEMPLATE: &str = "output_path";

/// Renders contexts through the content and output path templates.
///
/// Both templates are compiled once, when the renderer is created.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compile `template` and `output_path`; syntax errors surface here.
    pub fn new(
        template: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Result<Self, PluginError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        naming::register(&mut env);
        env.add_template_owned(CONTENT_TEMPLATE, template.into())?;
        env.add_template_owned(OUTPUT_PATH_TEMPLATE, output_path.into())?;

        Ok(Self { env })
    }

    /// Load and compile the template file named in `options`.
    pub fn from_options(options: &PluginOptions) -> Result<Self, PluginError> {
        let template =
            std::fs::read_to_string(&options.template).map_err(|source| PluginError::TemplateFile {
                path: options.template.clone(),
                source,
            })?;

        Self::new(template, options.output_path.clone())
    }

    /// Render one unit into its output path and content.
    pub fn render(&self, context: &RenderContext<'_>) -> Result<GeneratedFile, PluginError> {
        let content = self.env.get_template(CONTENT_TEMPLATE)?.render(context)?;
        let path = self.env.get_template(OUTPUT_PATH_TEMPLATE)?.render(context)?;

        Ok(GeneratedFile {
            path: path.trim().to_string(),
            content,
        })
    }

    /// Render every unit of every model.
    pub fn render_models(
        &self,
        models: &[FileModel],
        unit: GenerateType,
    ) -> Result<Vec<GeneratedFile>, PluginError> {
        let mut files = Vec::new();

        for model in models {
            for context in units(model, unit) {
                files.push(self.render(&context)?);
            }
            tracing::debug!(file = %model.file_name, unit = %unit, "rendered model");
        }

        Ok(files)
    }
}
