//! protogen-core - Descriptor model building for protoc-gen-template
//!
//! This crate turns the `FileDescriptorProto`s of a protoc plugin request
//! into a render-ready model:
//! - [`TypeResolver`] maps field wire types to target-language type names
//! - [`ModelBuilder`] folds the nested message tree into [`MessageDescriptor`]s
//! - [`linker`] resolves service method types against the built messages
//! - [`FileModel::merge`] concatenates models of several files
//! - [`PluginOptions`] parses the plugin parameter string
//!
//! # Pipeline
//!
//! ```text
//! FileDescriptorProto
//!     ↓
//!  [ModelBuilder] ← TypeResolver
//!     ↓
//!  [linker]
//!     ↓
//!  FileModel ─→ (optional) merge ─→ templates
//! ```

pub mod builder;
pub mod error;
pub mod linker;
pub mod model;
pub mod options;
pub mod types;

pub use builder::ModelBuilder;
pub use error::{GenerateError, GenerateResult};
pub use model::{
    FieldDescriptor, FileModel, MessageDescriptor, ServiceDescriptor, ServiceMethodDescriptor,
    merge_all, merge_into,
};
pub use options::{GenerateType, PluginOptions, RawOptions};
pub use types::{Language, TypeResolver, UnresolvedType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FileModel, GenerateError, GenerateResult, GenerateType, Language, MessageDescriptor,
        ModelBuilder, PluginOptions, ServiceDescriptor, TypeResolver,
    };
}
