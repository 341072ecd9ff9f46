#![cfg(test)]

use super::*;
use crate::WriterKind;

#[test]
fn defaults() {
    let config = EncoderConfig::default();
    assert_eq!(config.string_chunk_size().get(), 0x8000);
    assert_eq!(config.bytes_chunk_size().get(), 0x8000);
    assert_eq!(config.max_depth(), None);
    assert_eq!(config.registry(), &TypeRegistry::default());
    assert_eq!(config.annotation().type_field(), "$class");
    assert_eq!(config.annotation().payload_field(), "$");
}

#[test]
fn builder() {
    let size = NonZeroU16::new(4).expect("should be non-zero");
    let config = EncoderConfig::default()
        .with_string_chunk_size(size)
        .with_bytes_chunk_size(size)
        .with_max_depth(Some(2))
        .with_annotation(Annotation::new("type", "value"))
        .with_registry(TypeRegistry::empty());
    assert_eq!(config.string_chunk_size(), size);
    assert_eq!(config.bytes_chunk_size(), size);
    assert_eq!(config.max_depth(), Some(2));
    assert_eq!(config.annotation(), &Annotation::new("type", "value"));
    assert!(config.registry().is_empty());
}

#[test]
fn registry_mut() {
    let mut config = EncoderConfig::default();
    _ = config.registry_mut().insert("com.example.Id", WriterKind::Long);
    assert_eq!(config.registry().get("com.example.Id"), Some(WriterKind::Long));
}
