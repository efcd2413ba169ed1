//! Path Syntax Tests
//!
//! Grammar, escapes and limits, observed through lookups and mutations.

use crate::test_utils::*;
use subdoc::{PathComponent, MAX_PATH_DEPTH, MAX_PATH_LENGTH};

fn get(document: serde_json::Value, path: &str) -> OperationResult {
    evaluate_lookups(&JsonValue::from(document), &[LookupOp::get(path)])
        .pop()
        .unwrap()
}

#[test]
fn test_backtick_field_with_dot() {
    let result = get(json!({"literal.dot": 1, "literal": {"dot": 2}}), "`literal.dot`");
    assert_eq!(result.content_as::<i64>().unwrap(), 1);
    let result = get(json!({"literal.dot": 1, "literal": {"dot": 2}}), "literal.dot");
    assert_eq!(result.content_as::<i64>().unwrap(), 2);
}

#[test]
fn test_backtick_field_with_brackets_and_backtick() {
    let doc = json!({"a[0]": "brackets", "tick`tock": "backtick"});
    assert_eq!(get(doc.clone(), "`a[0]`").content_as::<String>().unwrap(), "brackets");
    assert_eq!(get(doc, "`tick``tock`").content_as::<String>().unwrap(), "backtick");
}

#[test]
fn test_escaped_quote_and_backslash() {
    let doc = json!({"literal\"quote": 1, "back\\slash": 2});
    assert_eq!(get(doc.clone(), "literal\\\"quote").content_as::<i64>().unwrap(), 1);
    assert_eq!(get(doc.clone(), "back\\\\slash").content_as::<i64>().unwrap(), 2);
    assert_eq!(
        get(doc, "literal\"quote").error(),
        Some(SubdocErrorKind::InvalidPath)
    );
}

#[test]
fn test_last_element_index() {
    let doc = json!({"some": {"array": [1, 2, 3]}});
    assert_eq!(get(doc.clone(), "some.array[-1]").content_as::<i64>().unwrap(), 3);
    assert_eq!(
        get(doc, "some.array[-2]").error(),
        Some(SubdocErrorKind::InvalidPath)
    );
}

#[test]
fn test_nested_arrays() {
    let doc = json!({"matrix": [[1, 2], [3, [4, 5]]]});
    assert_eq!(get(doc.clone(), "matrix[1][1][0]").content_as::<i64>().unwrap(), 4);
    assert_eq!(get(doc, "matrix[-1][-1][-1]").content_as::<i64>().unwrap(), 5);
}

#[test]
fn test_malformed_paths() {
    for path in ["a..b", "a.", ".a", "a[", "a[x]", "a[1", "`open", "a]b", "a.[0]"] {
        assert_eq!(
            get(json!({}), path).error(),
            Some(SubdocErrorKind::InvalidPath),
            "path {:?}",
            path
        );
    }
}

#[test]
fn test_length_limit_counts_characters() {
    let at_limit = "a".repeat(MAX_PATH_LENGTH);
    assert_eq!(
        get(json!({}), &at_limit).error(),
        Some(SubdocErrorKind::PathNotFound)
    );
    let over = "a".repeat(MAX_PATH_LENGTH + 1);
    assert_eq!(get(json!({}), &over).error(), Some(SubdocErrorKind::PathTooLong));

    // 1024 two-byte characters are still within the limit
    let wide = "é".repeat(MAX_PATH_LENGTH);
    assert_eq!(
        get(json!({}), &wide).error(),
        Some(SubdocErrorKind::PathNotFound)
    );
}

#[test]
fn test_depth_limit() {
    let deep_ok = vec!["a"; MAX_PATH_DEPTH].join(".");
    assert_eq!(
        get(json!({}), &deep_ok).error(),
        Some(SubdocErrorKind::PathNotFound)
    );
    let too_deep = vec!["a"; MAX_PATH_DEPTH + 1].join(".");
    assert_eq!(
        get(json!({}), &too_deep).error(),
        Some(SubdocErrorKind::PathTooDeep)
    );
}

#[test]
fn test_mutation_at_depth_limit() {
    let path = vec!["l"; MAX_PATH_DEPTH].join(".");
    let outcome = evaluate_mutations(
        &JsonValue::object(),
        &[MutateOp::upsert(path.clone(), "deep").create_parents(true)],
    )
    .unwrap();
    let results = evaluate_lookups(&outcome.document, &[LookupOp::get(path)]);
    assert_eq!(results[0].content_as::<String>().unwrap(), "deep");
}

#[test]
fn test_rendered_path_reparses() {
    let path = SubdocPath::root()
        .field("purchases")
        .field("with.dot")
        .index(3)
        .last()
        .field("quote\"and`tick");
    let text = path.to_string();
    let reparsed: SubdocPath = text.parse().unwrap();
    assert_eq!(reparsed, path);
    assert_eq!(
        reparsed.last_component(),
        Some(&PathComponent::Field("quote\"and`tick".to_string()))
    );
}
