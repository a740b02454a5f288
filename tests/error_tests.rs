//! Error handling tests

use jsonsheet::error::ConvertError;
use jsonsheet::projector::project_workbook;

#[test]
fn test_every_error_is_prefixed() {
    let errors = [
        ConvertError::Shape("bad root".to_string()),
        ConvertError::Export("disk full".to_string()),
        ConvertError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        project_workbook(b"{").unwrap_err(),
    ];
    for err in errors {
        assert!(
            err.to_string().starts_with("Failed to convert JSON: "),
            "unprefixed: {}",
            err
        );
    }
}

#[test]
fn test_shape_error_message() {
    let err = ConvertError::Shape("JSON must be an object or array of objects".to_string());
    assert_eq!(
        err.to_string(),
        "Failed to convert JSON: JSON must be an object or array of objects"
    );
}

#[test]
fn test_empty_array_message() {
    let err = project_workbook(b"[]").unwrap_err();
    assert!(err.to_string().contains("Input JSON array is empty"));
}

#[test]
fn test_input_errors_classified() {
    assert!(project_workbook(b"nope").unwrap_err().is_input_error());
    assert!(project_workbook(b"1").unwrap_err().is_input_error());
    assert!(!ConvertError::Export("x".to_string()).is_input_error());
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: ConvertError = io_err.into();
    assert!(matches!(err, ConvertError::Io(_)));
    assert!(err.to_string().contains("denied"));
}

#[test]
fn test_parse_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ConvertError = json_err.into();
    assert!(matches!(err, ConvertError::Parse(_)));
    assert!(err.to_string().contains("invalid JSON text"));
}
