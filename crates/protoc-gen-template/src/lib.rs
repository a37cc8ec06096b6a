//! protoc-gen-template - render protobuf schemas through templates
//!
//! This crate provides the plugin side of the generator:
//! - [`plugin`] decodes the protoc request and runs the pipeline
//! - [`render`] turns model units into files via minijinja templates
//! - [`naming`] case conversion filters available to templates
//! - [`output`] collects rendered files into the response
//!
//! The model itself is built by [`protogen_core`].

pub mod error;
pub mod logging;
pub mod naming;
pub mod output;
pub mod plugin;
pub mod render;

pub use error::PluginError;
pub use output::GeneratedFile;
pub use render::{RenderContext, Renderer};
