#![allow(non_snake_case)]

use super::*;

fn field(name: &str, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        r#type: Some(ty as i32),
        label: Some(Label::Optional as i32),
        ..Default::default()
    }
}

fn message_field(name: &str, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.into()),
        ..field(name, Type::Message)
    }
}

fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.label = Some(Label::Repeated as i32);
    field
}

#[test]
fn TypeResolver___timestamp___uses_native_date_type() {
    let ts = message_field("created_at", TIMESTAMP_TYPE_NAME);

    assert_eq!(
        TypeResolver::new(Language::TypeScript).resolve(&ts).unwrap(),
        "Date"
    );
    assert_eq!(
        TypeResolver::new(Language::Dart).resolve(&ts).unwrap(),
        "DateTime"
    );
    assert_eq!(
        TypeResolver::new(Language::Go).resolve(&ts).unwrap(),
        "time.Time"
    );
}

#[test]
fn TypeResolver___message_reference___strips_scope() {
    let resolver = TypeResolver::new(Language::TypeScript);

    let name = resolver
        .resolve(&message_field("address", ".shop.customer.Address"))
        .unwrap();

    assert_eq!(name, "Address");
}

#[test]
fn TypeResolver___item_message_reference___uses_local_name() {
    let resolver = TypeResolver::new(Language::Dart);

    let name = resolver
        .resolve(&message_field("line", ".shop.Order.__LineItem"))
        .unwrap();

    assert_eq!(name, "LineItem");
}

#[test]
fn TypeResolver___repeated_item_message___wraps_local_name() {
    let resolver = TypeResolver::new(Language::TypeScript);

    let name = resolver
        .resolve(&repeated(message_field("items", ".shop.Order.__Item")))
        .unwrap();

    assert_eq!(name, "Item[]");
}

#[test]
fn TypeResolver___repeated_timestamp___wraps_date_type() {
    let resolver = TypeResolver::new(Language::Go);

    let name = resolver
        .resolve(&repeated(message_field("seen", TIMESTAMP_TYPE_NAME)))
        .unwrap();

    assert_eq!(name, "[]time.Time");
}

#[test]
fn TypeResolver___bytes___fails_with_unresolved_type() {
    let resolver = TypeResolver::new(Language::TypeScript);

    let err = resolver.resolve(&field("payload", Type::Bytes)).unwrap_err();

    assert_eq!(
        err,
        UnresolvedType {
            field: "payload".into(),
            wire_type: "bytes".into(),
            language: "typescript".into(),
        }
    );
}

#[test]
fn TypeResolver___unset_wire_type___fails_with_unresolved_type() {
    let resolver = TypeResolver::new(Language::Go);
    let unset = FieldDescriptorProto {
        name: Some("mystery".into()),
        ..Default::default()
    };

    let err = resolver.resolve(&unset).unwrap_err();

    assert_eq!(err.wire_type, "unset");
}

#[test]
fn TypeResolver___unknown_wire_type_value___fails_with_unresolved_type() {
    let resolver = TypeResolver::new(Language::Go);
    let unknown = FieldDescriptorProto {
        name: Some("mystery".into()),
        r#type: Some(99),
        ..Default::default()
    };

    let err = resolver.resolve(&unknown).unwrap_err();

    assert_eq!(err.wire_type, "unknown(99)");
}

#[test]
fn bare_type_name___unqualified___unchanged() {
    assert_eq!(bare_type_name("Order"), "Order");
}

#[test]
fn bare_type_name___nested_item___keeps_only_last_component() {
    assert_eq!(bare_type_name(".a.b.Outer.Inner.__Entry"), "Entry");
}

#[test]
fn Language___from_str___unknown_is_config_error() {
    let err = "cobol".parse::<Language>().unwrap_err();

    assert!(err.is_config());
    assert!(err.to_string().contains("cobol"));
}

#[test]
fn Language___display___matches_option_value() {
    for lang in Language::ALL {
        assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
    }
}

#[test]
fn Language___wrap_repeated___wraps_once() {
    assert_eq!(Language::Dart.wrap_repeated("List<int>"), "List<List<int>>");
    assert_eq!(Language::TypeScript.wrap_repeated("{}"), "{}[]");
}
