//! protoc plugin protocol.
//!
//! protoc writes a `CodeGeneratorRequest` to the plugin's stdin and reads a
//! `CodeGeneratorResponse` from its stdout. One request is one generation
//! run: options are parsed, a model is built for every file to generate,
//! models are optionally merged, and every unit is rendered.

use crate::error::PluginError;
use crate::output;
use crate::render::Renderer;
use prost::Message;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use protogen_core::{FileModel, PluginOptions, merge_all};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::Path;

/// Run the whole pipeline for `request`.
///
/// Existing-file checks for `overwrite=false` are relative to the current
/// directory, which is where protoc resolves output paths.
pub fn generate(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse, PluginError> {
    generate_in(request, Path::new("."))
}

/// Run the whole pipeline, checking existing files below `root`.
pub fn generate_in(
    request: &CodeGeneratorRequest,
    root: &Path,
) -> Result<CodeGeneratorResponse, PluginError> {
    let options = PluginOptions::from_parameter(request.parameter())?;
    let renderer = Renderer::from_options(&options)?;

    let models = build_models(request, &options)?;
    let rendered = renderer.render_models(&models, options.generate_type)?;
    let file = output::collect(rendered, options.overwrite, root);

    tracing::info!(
        files = file.len(),
        lang = %options.language,
        unit = %options.generate_type,
        "generation complete"
    );

    Ok(CodeGeneratorResponse {
        file,
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    })
}

/// Build the models of every file to generate, in request order.
///
/// With `allow_merge` the result holds at most one model.
pub fn build_models(
    request: &CodeGeneratorRequest,
    options: &PluginOptions,
) -> Result<Vec<FileModel>, PluginError> {
    let files: HashMap<&str, &FileDescriptorProto> = request
        .proto_file
        .iter()
        .map(|file| (file.name(), file))
        .collect();
    let builder = options.model_builder();

    let mut models = Vec::with_capacity(request.file_to_generate.len());
    for name in &request.file_to_generate {
        let file = files
            .get(name.as_str())
            .ok_or_else(|| PluginError::MissingFile(name.clone()))?;
        models.push(builder.build_file(file)?);
    }

    if options.allow_merge {
        tracing::debug!(files = models.len(), "merging file models");
        return Ok(merge_all(models).into_iter().collect());
    }

    Ok(models)
}

/// Decode a request and run the pipeline.
pub fn respond(bytes: &[u8]) -> Result<CodeGeneratorResponse, PluginError> {
    let request = CodeGeneratorRequest::decode(bytes)?;
    generate(&request)
}

/// Response reporting `err` to protoc.
pub fn error_response(err: &PluginError) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}

/// Build a request from a serialized `FileDescriptorSet`.
///
/// With no `files` every file of the set is generated.
pub fn request_from_descriptor_set(
    bytes: &[u8],
    parameter: String,
    files: Vec<String>,
) -> Result<CodeGeneratorRequest, PluginError> {
    let set = FileDescriptorSet::decode(bytes)?;

    let file_to_generate = if files.is_empty() {
        set.file.iter().map(|f| f.name().to_string()).collect()
    } else {
        files
    };

    Ok(CodeGeneratorRequest {
        file_to_generate,
        parameter: Some(parameter),
        proto_file: set.file,
        ..Default::default()
    })
}

/// Plugin mode: read the request from stdin, write the response to stdout.
///
/// On failure the error is reported in the response and returned, so the
/// caller can exit with a failure status.
pub fn run_stdio() -> Result<(), PluginError> {
    let mut buf = Vec::new();
    io::stdin().lock().read_to_end(&mut buf)?;

    let (response, outcome) = match respond(&buf) {
        Ok(response) => (response, Ok(())),
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            (error_response(&err), Err(err))
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&response.encode_to_vec())?;
    stdout.flush()?;

    outcome
}
