//! Service linking.
//!
//! Methods reference their input and output messages by fully qualified
//! name (`.shop.Order.Address`). The linker resolves those names against the
//! messages built for the same file, qualified by the file's package and
//! their ancestors. Names that are not part of it (imports from other files
//! or packages, item messages, messages left out by the flatten policy) stay
//! unresolved and the method carries `None`.

use crate::model::{MessageDescriptor, ServiceDescriptor, ServiceMethodDescriptor};
use prost_types::{MethodDescriptorProto, ServiceDescriptorProto};
use std::collections::HashMap;
use std::sync::Arc;

const SERVICE_SUFFIX: &str = "service";

/// Index over a message sequence keyed by fully qualified name; the first
/// message with a name wins.
#[derive(Debug, Default)]
pub struct MessageIndex<'a> {
    by_name: HashMap<String, &'a MessageDescriptor>,
}

impl<'a> MessageIndex<'a> {
    pub fn new(package: &str, messages: &'a [MessageDescriptor]) -> Self {
        let mut by_name = HashMap::with_capacity(messages.len());
        for message in messages {
            by_name
                .entry(qualified_name(package, message))
                .or_insert(message);
        }
        Self { by_name }
    }

    /// Find the message a fully qualified type name refers to.
    pub fn get(&self, type_name: &str) -> Option<&'a MessageDescriptor> {
        self.by_name.get(type_name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn link_method(&self, method: &MethodDescriptorProto) -> ServiceMethodDescriptor {
        let input = self.lookup(method.name(), method.input_type());
        let output = self.lookup(method.name(), method.output_type());

        ServiceMethodDescriptor {
            name: method.name().to_string(),
            input_type: method.input_type().to_string(),
            output_type: method.output_type().to_string(),
            input,
            output,
        }
    }

    fn lookup(&self, method: &str, type_name: &str) -> Option<MessageDescriptor> {
        let found = self.get(type_name).cloned();
        if found.is_none() {
            tracing::debug!(method, type_name, "message not in current model, leaving unlinked");
        }
        found
    }
}

/// Fully qualified protobuf name of `message` declared in `package`.
///
/// ```
/// use protogen_core::linker::qualified_name;
/// use protogen_core::MessageDescriptor;
///
/// let order = MessageDescriptor { name: "Order".into(), ..Default::default() };
/// assert_eq!(qualified_name("shop.v1", &order), ".shop.v1.Order");
/// assert_eq!(qualified_name("", &order), ".Order");
/// ```
pub fn qualified_name(package: &str, message: &MessageDescriptor) -> String {
    if package.is_empty() {
        format!(".{}", message.nested_name())
    } else {
        format!(".{package}.{}", message.nested_name())
    }
}

/// Build service descriptors for `services` declared in `package`, linking
/// every method to `messages`.
pub fn link_services(
    package: &str,
    services: &[ServiceDescriptorProto],
    messages: &[MessageDescriptor],
) -> Vec<ServiceDescriptor> {
    let index = MessageIndex::new(package, messages);
    let shared: Arc<[MessageDescriptor]> = Arc::from(messages);

    services
        .iter()
        .map(|service| ServiceDescriptor {
            name: strip_service_suffix(service.name()).to_string(),
            methods: service.method.iter().map(|m| index.link_method(m)).collect(),
            messages: Arc::clone(&shared),
        })
        .collect()
}

/// Remove one trailing `Service` suffix, ignoring case.
///
/// A name that is nothing but the suffix is kept as is.
///
/// ```
/// use protogen_core::linker::strip_service_suffix;
///
/// assert_eq!(strip_service_suffix("OrderService"), "Order");
/// assert_eq!(strip_service_suffix("Ordering"), "Ordering");
/// ```
pub fn strip_service_suffix(name: &str) -> &str {
    let Some(at) = name.len().checked_sub(SERVICE_SUFFIX.len()) else {
        return name;
    };

    if at > 0 && name.is_char_boundary(at) && name[at..].eq_ignore_ascii_case(SERVICE_SUFFIX) {
        &name[..at]
    } else {
        name
    }
}
