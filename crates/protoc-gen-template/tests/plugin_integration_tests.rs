//! Integration tests for the plugin pipeline.
//!
//! Requests are built in memory and rendered through the templates shipped
//! in `templates/`, or through ad-hoc templates in a temporary directory.

#![allow(non_snake_case)]

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use protoc_gen_template::PluginError;
use protoc_gen_template::plugin::{generate, generate_in, respond};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn sample_template(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(path)
}

fn field(name: &str, ty: Type, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        r#type: Some(ty as i32),
        label: Some(label as i32),
        ..Default::default()
    }
}

fn shop_file() -> FileDescriptorProto {
    let mut note = field("note", Type::String, Label::Optional);
    note.proto3_optional = Some(true);

    let order = DescriptorProto {
        name: Some("Order".into()),
        field: vec![
            field("id", Type::String, Label::Optional),
            field("total", Type::Double, Label::Optional),
            FieldDescriptorProto {
                type_name: Some(".shop.Order.__Item".into()),
                ..field("items", Type::Message, Label::Repeated)
            },
            note,
        ],
        nested_type: vec![
            DescriptorProto {
                name: Some("__Item".into()),
                field: vec![field("sku", Type::String, Label::Optional)],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Shipping".into()),
                field: vec![field("carrier", Type::String, Label::Optional)],
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("shop/order.proto".into()),
        package: Some("shop.v1".into()),
        message_type: vec![order],
        service: vec![ServiceDescriptorProto {
            name: Some("OrderService".into()),
            method: vec![MethodDescriptorProto {
                name: Some("GetOrder".into()),
                input_type: Some(".google.protobuf.Empty".into()),
                output_type: Some(".shop.v1.Order".into()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn request(parameter: String) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["shop/order.proto".into()],
        parameter: Some(parameter),
        proto_file: vec![shop_file()],
        ..Default::default()
    }
}

fn names(response: &CodeGeneratorResponse) -> Vec<&str> {
    response.file.iter().map(|f| f.name()).collect()
}

#[test]
fn generate___typescript_messages___one_file_per_message() {
    let parameter = format!(
        "template={},lang=typescript,output_path={{{{ message.name | to_snake_case }}}}.ts,generate_type=message",
        sample_template("typescript/message.ts.j2").display()
    );

    let response = generate(&request(parameter)).unwrap();

    assert_eq!(names(&response), vec!["order.ts", "shipping.ts"]);
    let order = response.file[0].content();
    assert!(order.contains("export interface Item {"));
    assert!(order.contains("  id: string;"));
    assert!(order.contains("  total: number;"));
    assert!(order.contains("  items: Item[];"));
    assert!(order.contains("  note?: string;"));
    assert_eq!(response.supported_features, Some(1));
}

#[test]
fn generate___dart_messages___generic_collections() {
    let parameter = format!(
        "template={},lang=dart,output_path=lib/{{{{ message.name | to_snake_case }}}}.dart,generate_type=message,enable_message_flatten=false",
        sample_template("dart/message.dart.j2").display()
    );

    let response = generate(&request(parameter)).unwrap();

    assert_eq!(names(&response), vec!["lib/order.dart", "lib/shipping.dart"]);
    let order = response.file[0].content();
    assert!(order.contains("final List<Item> items;"));
    assert!(order.contains("final String? note;"));
    assert!(order.contains("required this.total,"));
}

#[test]
fn generate___go_services___unlinked_input_renders_fallback() {
    let parameter = format!(
        "template={},lang=go,output_path={{{{ service.name | to_snake_case }}}}_service.go,generate_type=service",
        sample_template("go/service.go.j2").display()
    );

    let response = generate(&request(parameter)).unwrap();

    assert_eq!(names(&response), vec!["order_service.go"]);
    let content = response.file[0].content();
    assert!(content.contains("package shopv1"));
    assert!(content.contains("type OrderService interface {"));
    assert!(content.contains("GetOrder(ctx context.Context, in *any) (*Order, error)"));
}

#[test]
fn generate___method_unit___sees_service_and_method() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("method.j2");
    fs::write(&template, "{{ service.name }}.{{ method.name }}").unwrap();
    let parameter = format!(
        "template={},lang=go,output_path={{{{ method.name }}}}.txt,generate_type=method",
        template.display()
    );

    let response = generate(&request(parameter)).unwrap();

    assert_eq!(names(&response), vec!["GetOrder.txt"]);
    assert_eq!(response.file[0].content(), "Order.GetOrder");
}

#[test]
fn generate___unmapped_field___unresolved_type_error() {
    let mut req = request(format!(
        "template={},lang=typescript,output_path=x,generate_type=file",
        sample_template("typescript/message.ts.j2").display()
    ));
    req.proto_file[0].message_type[0]
        .field
        .push(field("blob", Type::Bytes, Label::Optional));

    let err = generate(&req).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("`Order`"), "{message}");
    assert!(message.contains("`blob`"), "{message}");
}

#[test]
fn generate___missing_option___config_error_before_build() {
    let err = generate(&request("lang=go".into())).unwrap_err();

    assert!(matches!(err, PluginError::Generate(e) if e.is_config()));
}

#[test]
fn generate_in___no_overwrite___skips_existing_output() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("file.j2");
    fs::write(&template, "{{ package }}").unwrap();
    fs::write(dir.path().join("shop.txt"), "kept").unwrap();
    let parameter = format!(
        "template={},lang=go,output_path={{{{ message.name | to_snake_case }}}}.txt,generate_type=message,overwrite=false",
        template.display()
    );

    let mut req = request(parameter);
    req.proto_file[0].message_type[0].name = Some("Shop".into());
    let response = generate_in(&req, dir.path()).unwrap();

    assert_eq!(names(&response), vec!["shipping.txt"]);
}

#[test]
fn respond___encoded_request___renders() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("file.j2");
    fs::write(&template, "{% for m in file.messages %}{{ m.name }}\n{% endfor %}").unwrap();
    let parameter = format!(
        "template={},lang=go,output_path=all.txt,generate_type=file",
        template.display()
    );

    let response = respond(&request(parameter).encode_to_vec()).unwrap();

    assert_eq!(response.file[0].content(), "Order\nShipping\n");
}

#[test]
fn generate___broken_template___reported_before_model_build() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("broken.j2");
    fs::write(&template, "{% for m in file.messages %}").unwrap();
    let mut req = request(format!(
        "template={},lang=go,output_path=x,generate_type=file",
        template.display()
    ));
    req.proto_file[0].message_type[0]
        .field
        .push(field("blob", Type::Bytes, Label::Optional));

    let err = generate(&req).unwrap_err();

    assert!(matches!(err, PluginError::Template(_)), "{err}");
}
