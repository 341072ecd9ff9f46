#![cfg(test)]

use super::*;

#[test]
fn type_error_message() {
    let error = EncodeError::type_error(WriterKind::Bytes, "bytes", "string");
    assert_eq!(
        error.to_string(),
        String::from("type error: bytes writer expected bytes, found string")
    );
}

#[test]
fn unknown_type_message() {
    let error = EncodeError::UnknownType(String::from("com.example.Missing"));
    assert_eq!(
        error.to_string(),
        String::from("unknown type: \"com.example.Missing\"")
    );
}

#[test]
fn length_overflow_message() {
    let error = EncodeError::LengthOverflow {
        what: "type name",
        len: 70_000,
    };
    assert_eq!(
        error.to_string(),
        String::from("type name length 70000 exceeds the maximum value")
    );
}

#[test]
fn error_from_io() {
    let error = EncodeError::from(std::io::Error::other("closed"));
    assert!(matches!(error, EncodeError::Io(_)));
    assert_eq!(error.to_string(), String::from("closed"));
}
