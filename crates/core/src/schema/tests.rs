// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn content_type(name: &str) -> ContentType {
    ContentType {
        name: name.to_owned(),
        labels: ContentTypeLabels {
            name: "Things".to_owned(),
            singular_name: "Thing".to_owned(),
        },
        public: true,
        has_archive: false,
        rewrite_slug: name.to_owned(),
        menu_icon: None,
    }
}

fn field(content_type: &str, key: &str, data_type: FieldDataType) -> FieldDeclaration {
    FieldDeclaration {
        content_type: content_type.to_owned(),
        key: key.to_owned(),
        label: key.to_owned(),
        data_type,
        single: true,
        show_in_rest: true,
    }
}

#[test]
fn declare_field_requires_declared_type() {
    let mut registry = Registry::new();
    assert!(matches!(
        registry.declare_field(field("things", "size", FieldDataType::Integer)),
        Err(RegistryError::UndeclaredContentType(_))
    ));
    registry.declare_type(content_type("things")).unwrap();
    registry
        .declare_field(field("things", "size", FieldDataType::Integer))
        .unwrap();
    assert_eq!(1, registry.fields_of("things").count());
}

#[test]
fn reject_invalid_declarations() {
    let mut registry = Registry::new();
    assert!(registry.declare_type(content_type("")).is_err());
    assert!(registry.declare_type(content_type("two words")).is_err());
    assert!(registry.declare_type(content_type("a/b")).is_err());
    assert_eq!(0, registry.content_types().count());

    registry.declare_type(content_type("things")).unwrap();
    assert!(matches!(
        registry.declare_field(field("things", "", FieldDataType::String)),
        Err(RegistryError::InvalidField { .. })
    ));
}

#[test]
fn redeclaring_replaces_without_duplicates() {
    let mut registry = Registry::new();
    registry.declare_type(content_type("things")).unwrap();
    registry
        .declare_field(field("things", "size", FieldDataType::Integer))
        .unwrap();
    registry
        .declare_field(field("things", "name", FieldDataType::String))
        .unwrap();

    let mut redeclared_type = content_type("things");
    redeclared_type.has_archive = true;
    registry.declare_type(redeclared_type).unwrap();
    registry
        .declare_field(field("things", "size", FieldDataType::String))
        .unwrap();

    assert_eq!(1, registry.content_types().count());
    assert!(registry.content_type("things").unwrap().has_archive);
    let keys = registry
        .fields_of("things")
        .map(|field| field.key.as_str())
        .collect::<Vec<_>>();
    // Order of the first declaration is preserved
    assert_eq!(vec!["size", "name"], keys);
    assert_eq!(
        FieldDataType::String,
        registry.field("things", "size").unwrap().data_type
    );
}

#[test]
fn fields_are_scoped_by_type() {
    let mut registry = Registry::new();
    registry.declare_type(content_type("things")).unwrap();
    registry.declare_type(content_type("others")).unwrap();
    registry
        .declare_field(field("things", "size", FieldDataType::Integer))
        .unwrap();
    registry
        .declare_field(field("others", "size", FieldDataType::String))
        .unwrap();
    assert_eq!(1, registry.fields_of("things").count());
    assert_eq!(1, registry.fields_of("others").count());
    assert_eq!(0, registry.fields_of("unknown").count());
}

#[test]
fn look_up_field_by_type_and_key() {
    let mut registry = Registry::new();
    registry.declare_type(content_type("things")).unwrap();
    registry
        .declare_field(field("things", "size", FieldDataType::Integer))
        .unwrap();
    let declared = {
        let content_type = String::from("things");
        registry.field(&content_type, "size").map(|field| field.key.clone())
    };
    assert_eq!(Some("size".to_owned()), declared);
    assert!(registry.field("things", "weight").is_none());
    assert!(registry.field("others", "size").is_none());
}
