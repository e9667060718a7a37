//! Tests for error types

use resource_ledger::core::LedgerError;

#[test]
fn test_storage_unavailable_error() {
    let err = LedgerError::StorageUnavailable;
    assert_eq!(format!("{err}"), "storage unavailable");
}

#[test]
fn test_serialization_error() {
    let err = LedgerError::Serialization("unexpected token".to_string());
    assert_eq!(format!("{err}"), "serialization failure: unexpected token");
}

#[test]
fn test_backend_error() {
    let err = LedgerError::Backend("disk full".to_string());
    assert_eq!(format!("{err}"), "backend error: disk full");
}

#[test]
fn test_validation_error() {
    let err = LedgerError::Validation("name empty".to_string());
    assert_eq!(format!("{err}"), "validation failure: name empty");
}
