//! Render-ready model of a protobuf file.
//!
//! The model is built once per generation run by [`crate::builder`] and
//! [`crate::linker`], then handed to the templates. Every value is immutable
//! once built: nested messages are stored as value copies, never as
//! references back into the tree.
//!
//! # Structure
//!
//! - [`FileModel`]: package, messages and services of one file (or of several
//!   files after [`FileModel::merge`])
//! - [`MessageDescriptor`]: a message with its fields, ancestor chain, nested
//!   children and item messages
//! - [`FieldDescriptor`]: a field with its resolved target type
//! - [`ServiceDescriptor`] / [`ServiceMethodDescriptor`]: services with their
//!   methods linked to messages by name
//!
//! All types serialize with serde so they can be passed straight into a
//! template context.

use serde::Serialize;
use std::sync::Arc;

/// Name prefix that marks a nested message as an item message.
///
/// Item messages only describe the element type of a collection field. They
/// are never rendered on their own.
pub const ITEM_MARKER: &str = "__";

/// Returns true if a declared message name carries the item marker
pub fn is_item_name(name: &str) -> bool {
    name.starts_with(ITEM_MARKER)
}

/// The model of one input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileModel {
    /// Protobuf package, e.g. `shop.v1`.
    pub package: String,

    /// Name of the source `.proto` file.
    pub file_name: String,

    /// Renderable messages in declaration order. Never contains item messages.
    pub messages: Vec<MessageDescriptor>,

    /// Services in declaration order.
    pub services: Vec<ServiceDescriptor>,
}

/// A message with resolved fields and nesting information.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageDescriptor {
    /// Declared name, unique within its declaring scope. Item messages carry
    /// their local name with the marker removed.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,

    /// Enclosing messages, outermost first. Empty for top-level messages.
    ///
    /// Ancestors are snapshots taken before their own nested messages were
    /// built, so their `children` and `item_messages` are empty.
    pub parents: Vec<MessageDescriptor>,

    /// Immediately nested messages that are not item messages.
    pub children: Vec<MessageDescriptor>,

    /// Immediately nested item messages.
    pub item_messages: Vec<MessageDescriptor>,

    /// Whether this message is itself an item message.
    pub is_item: bool,
}

impl MessageDescriptor {
    /// Nesting depth; zero for top-level messages.
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Name qualified by its ancestors, e.g. `Order.Address`.
    pub fn nested_name(&self) -> String {
        self.parents
            .iter()
            .map(|p| p.name.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Look up an item message by its local name, with or without the marker.
    pub fn item(&self, name: &str) -> Option<&MessageDescriptor> {
        let local = name.strip_prefix(ITEM_MARKER).unwrap_or(name);
        self.item_messages.iter().find(|m| m.name == local)
    }
}

/// A message field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,

    /// Target-language type name, including the repeated wrapper.
    pub type_name: String,

    /// Not marked `optional` in the schema.
    pub is_required: bool,

    /// Explicitly marked `optional` (proto3 optional).
    pub is_optional: bool,

    /// Typed as `google.protobuf.Timestamp`.
    pub is_timestamp: bool,

    pub is_repeated: bool,

    /// Typed as a message (including timestamps).
    pub is_message: bool,
}

/// An RPC service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceDescriptor {
    /// Declared name without a trailing `Service` suffix.
    pub name: String,

    pub methods: Vec<ServiceMethodDescriptor>,

    /// Every message of the file the service was declared in.
    pub messages: Arc<[MessageDescriptor]>,
}

/// A service method with its input and output messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceMethodDescriptor {
    pub name: String,

    /// Fully qualified input type name as declared.
    pub input_type: String,

    /// Fully qualified output type name as declared.
    pub output_type: String,

    /// Input message, if it is part of the current model.
    pub input: Option<MessageDescriptor>,

    /// Output message, if it is part of the current model.
    pub output: Option<MessageDescriptor>,
}

impl FileModel {
    /// Concatenate `other` onto this model.
    ///
    /// Messages and services keep arrival order. The package and file name
    /// of `self` win unless they are empty.
    pub fn merge(mut self, other: FileModel) -> FileModel {
        if self.package.is_empty() {
            self.package = other.package;
        }
        if self.file_name.is_empty() {
            self.file_name = other.file_name;
        }
        self.messages.extend(other.messages);
        self.services.extend(other.services);
        self
    }

    /// Returns true if the model has neither messages nor services
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.services.is_empty()
    }
}

/// Merge `next` into an accumulated model; an absent accumulator is the
/// identity.
pub fn merge_into(acc: Option<FileModel>, next: FileModel) -> FileModel {
    match acc {
        Some(acc) => acc.merge(next),
        None => next,
    }
}

/// Left-fold `models` into one, or `None` if there are none.
pub fn merge_all(models: impl IntoIterator<Item = FileModel>) -> Option<FileModel> {
    models
        .into_iter()
        .fold(None, |acc, model| Some(merge_into(acc, model)))
}
