#![cfg(feature = "serde")]

//! Integration tests for serde support in persistent_array.
//!
//! An array serializes as a plain sequence, so it round-trips through JSON
//! and interoperates with `Vec`.

use persistent_array::persistent::PersistentArray;
use rstest::rstest;

// =============================================================================
// PersistentArray Integration Tests
// =============================================================================

#[rstest]
fn test_array_json_roundtrip() {
    let array: PersistentArray<i32> = (0..100).collect();
    let json = serde_json::to_string(&array).unwrap();
    let restored: PersistentArray<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(array, restored);
    assert_eq!(restored.layout(), array.layout());
}

#[rstest]
fn test_array_serializes_as_sequence() {
    let array = PersistentArray::from(["a", "b", "c"]);
    assert_eq!(serde_json::to_string(&array).unwrap(), r#"["a","b","c"]"#);
}

#[rstest]
fn test_empty_array_roundtrip() {
    let array: PersistentArray<String> = PersistentArray::new();
    let json = serde_json::to_string(&array).unwrap();
    assert_eq!(json, "[]");
    let restored: PersistentArray<String> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_array_interoperates_with_vec() {
    let vector = vec![1.5, 2.5, 3.5];
    let json = serde_json::to_string(&vector).unwrap();
    let array: PersistentArray<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(array.to_vec(), vector);
}

#[rstest]
fn test_nested_arrays_roundtrip() {
    let nested: PersistentArray<PersistentArray<u8>> = (0..5)
        .map(|length| (0..length).collect())
        .collect();
    let json = serde_json::to_string(&nested).unwrap();
    assert_eq!(json, "[[],[0],[0,1],[0,1,2],[0,1,2,3]]");
    let restored: PersistentArray<PersistentArray<u8>> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, nested);
}

#[rstest]
fn test_invalid_json_is_error() {
    let result: Result<PersistentArray<i32>, _> = serde_json::from_str(r#"{"not": "a sequence"}"#);
    assert!(result.is_err());
}
