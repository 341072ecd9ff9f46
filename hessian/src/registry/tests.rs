#![cfg(test)]

use super::*;
use crate::{List, Map};

#[test]
fn default_primitive_names() {
    let registry = TypeRegistry::default();
    assert_eq!(registry.get("int"), Some(WriterKind::Int));
    assert_eq!(registry.get("java.lang.Integer"), Some(WriterKind::Int));
    assert_eq!(registry.get("long"), Some(WriterKind::Long));
    assert_eq!(registry.get("double"), Some(WriterKind::Double));
    assert_eq!(registry.get("date"), Some(WriterKind::Date));
    assert_eq!(registry.get("bytes"), Some(WriterKind::Bytes));
    assert_eq!(registry.get("java.lang.String"), Some(WriterKind::String));
    assert_eq!(registry.get("boolean"), Some(WriterKind::Bool));
}

#[test]
fn default_composite_names() {
    let registry = TypeRegistry::default();
    assert_eq!(registry.get(crate::DEFAULT_MAP_TYPE), Some(WriterKind::Map));
    assert_eq!(registry.get(crate::DEFAULT_LIST_TYPE), Some(WriterKind::Array));
    assert_eq!(registry.get("java.util.Map"), Some(WriterKind::Map));
    assert_eq!(registry.get("java.util.List"), Some(WriterKind::Array));
}

#[test]
fn default_has_no_duplicate_names() {
    assert_eq!(TypeRegistry::default().len(), DEFAULT_TYPES.len());
}

#[test]
fn empty_registry() {
    let registry = TypeRegistry::empty();
    assert!(registry.is_empty());
    assert_eq!(registry.get("int"), None);
    assert_eq!(registry.resolve("int", &Value::Int(1)), None);
}

#[test]
fn insert_and_remove() {
    let mut registry = TypeRegistry::empty();
    assert_eq!(registry.insert("id", WriterKind::Long), None);
    assert_eq!(registry.insert("id", WriterKind::Int), Some(WriterKind::Long));
    assert_eq!(registry.remove("id"), Some(WriterKind::Int));
    assert_eq!(registry.remove("id"), None);
}

#[test]
fn resolve_class_names() {
    let registry = TypeRegistry::default();
    let map = Value::from(Map::new());
    let list = Value::from(List::new());
    assert_eq!(
        registry.resolve("com.example.User", &map),
        Some(WriterKind::Map)
    );
    assert_eq!(
        registry.resolve("[com.example.User", &list),
        Some(WriterKind::Array)
    );
    assert_eq!(registry.resolve("[int", &list), Some(WriterKind::Array));
}

#[test]
fn resolve_rejects_mismatched_payloads() {
    let registry = TypeRegistry::default();
    assert_eq!(registry.resolve("com.example.User", &Value::Int(5)), None);
    assert_eq!(
        registry.resolve("com.example.User", &Value::from(List::new())),
        None
    );
    assert_eq!(
        registry.resolve("[com.example.User", &Value::from(Map::new())),
        None
    );
    assert_eq!(registry.resolve("", &Value::from(Map::new())), None);
}

#[test]
fn resolve_null_payloads() {
    let registry = TypeRegistry::empty();
    assert_eq!(
        registry.resolve("com.example.User", &Value::Null),
        Some(WriterKind::Null)
    );
}

#[test]
fn registered_names_win_over_class_names() {
    let registry = TypeRegistry::default().with_type("com.example.Id", WriterKind::Long);
    assert_eq!(
        registry.resolve("com.example.Id", &Value::Int(1)),
        Some(WriterKind::Long)
    );
}

#[test]
fn writer_kind_display() {
    assert_eq!(WriterKind::Array.to_string(), "array");
    assert!(WriterKind::Map.is_composite());
    assert!(!WriterKind::Long.is_composite());
}
