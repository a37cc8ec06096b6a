//! Descriptor model builder.
//!
//! Turns the nested `DescriptorProto` tree of a file into [`MessageDescriptor`]
//! values and the flat, renderable message sequence of a [`FileModel`].
//!
//! The tree is folded bottom-up: every nested level is fully built before its
//! parent is finished, and parents hold value copies of their children. The
//! nested results of each level are split into item messages and regular
//! children the same way regardless of the flatten policy; the policy only
//! decides how deep the top-level sequence reaches.

use crate::error::{GenerateError, GenerateResult};
use crate::linker;
use crate::model::{FieldDescriptor, FileModel, ITEM_MARKER, MessageDescriptor, is_item_name};
use crate::types::{TIMESTAMP_TYPE_NAME, TypeResolver, UnresolvedType, is_repeated, wire_type};
use prost_types::field_descriptor_proto::Type;
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

/// Builds [`FileModel`]s for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder {
    resolver: TypeResolver,
    flatten: bool,
}

impl ModelBuilder {
    /// Create a builder using `resolver` for field types.
    ///
    /// With `flatten` enabled every non-item descendant is promoted into the
    /// top-level message sequence; otherwise only immediate children are.
    pub fn new(resolver: TypeResolver, flatten: bool) -> Self {
        Self { resolver, flatten }
    }

    /// Build and link the model of one file.
    pub fn build_file(&self, file: &FileDescriptorProto) -> GenerateResult<FileModel> {
        let messages = self.build_messages(&file.message_type)?;
        let services = linker::link_services(file.package(), &file.service, &messages);

        tracing::debug!(
            file = file.name(),
            messages = messages.len(),
            services = services.len(),
            flatten = self.flatten,
            "built file model"
        );

        Ok(FileModel {
            package: file.package().to_string(),
            file_name: file.name().to_string(),
            messages,
            services,
        })
    }

    /// Build the top-level message sequence of `declarations`.
    pub fn build_messages(
        &self,
        declarations: &[DescriptorProto],
    ) -> GenerateResult<Vec<MessageDescriptor>> {
        let roots = self.build_level(declarations, &[])?;
        Ok(self.flatten_roots(roots))
    }

    /// Build every declaration of one nesting level, items included.
    pub fn build_level(
        &self,
        declarations: &[DescriptorProto],
        parents: &[MessageDescriptor],
    ) -> GenerateResult<Vec<MessageDescriptor>> {
        declarations
            .iter()
            .map(|decl| self.build_message(decl, parents))
            .collect()
    }

    fn build_message(
        &self,
        decl: &DescriptorProto,
        parents: &[MessageDescriptor],
    ) -> GenerateResult<MessageDescriptor> {
        let declared = decl.name();
        let fields = self
            .build_fields(&decl.field)
            .map_err(|source| GenerateError::UnresolvedType {
                message: qualified_name(parents, declared),
                source,
            })?;

        let is_item = is_item_name(declared);
        let name = declared.strip_prefix(ITEM_MARKER).unwrap_or(declared);

        let snapshot = MessageDescriptor {
            name: name.to_string(),
            fields,
            parents: parents.to_vec(),
            is_item,
            ..Default::default()
        };

        let mut lineage = parents.to_vec();
        lineage.push(snapshot.clone());
        let nested = self.build_level(&decl.nested_type, &lineage)?;

        let (item_messages, children): (Vec<_>, Vec<_>) =
            nested.into_iter().partition(|m| m.is_item);

        Ok(MessageDescriptor {
            children,
            item_messages,
            ..snapshot
        })
    }

    fn build_fields(
        &self,
        fields: &[FieldDescriptorProto],
    ) -> Result<Vec<FieldDescriptor>, UnresolvedType> {
        fields.iter().map(|f| self.build_field(f)).collect()
    }

    fn build_field(&self, field: &FieldDescriptorProto) -> Result<FieldDescriptor, UnresolvedType> {
        let type_name = self.resolver.resolve(field)?;
        let is_optional = field.proto3_optional();

        Ok(FieldDescriptor {
            name: field.name().to_string(),
            type_name,
            is_required: !is_optional,
            is_optional,
            is_timestamp: field.type_name() == TIMESTAMP_TYPE_NAME,
            is_repeated: is_repeated(field),
            is_message: wire_type(field) == Some(Type::Message),
        })
    }

    fn flatten_roots(&self, roots: Vec<MessageDescriptor>) -> Vec<MessageDescriptor> {
        let mut out = Vec::with_capacity(roots.len());

        for root in roots.into_iter().filter(|m| !m.is_item) {
            let children = root.children.clone();
            out.push(root);

            if self.flatten {
                push_descendants(&mut out, &children);
            } else {
                out.extend(children);
            }
        }

        out
    }
}

/// Depth-first, pre-order. `children` never holds item messages, so their
/// subtrees are never reached.
fn push_descendants(out: &mut Vec<MessageDescriptor>, children: &[MessageDescriptor]) {
    for child in children {
        out.push(child.clone());
        push_descendants(out, &child.children);
    }
}

fn qualified_name(parents: &[MessageDescriptor], name: &str) -> String {
    parents
        .iter()
        .map(|p| p.name.as_str())
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(".")
}
