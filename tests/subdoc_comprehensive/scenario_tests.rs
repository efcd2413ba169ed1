//! Scenario Tests
//!
//! The customer-document walkthroughs, one command family at a time.

use crate::test_utils::*;

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_get_nested_country() {
    let (collection, id, _) = setup_doc(json!({"addresses": {"delivery": {"country": "UK"}}}));
    let outcome = collection
        .lookup_in(&id, &[LookupOp::get("addresses.delivery.country")])
        .unwrap();
    assert_eq!(outcome.content_as::<String>(0).unwrap(), "UK");
}

#[test]
fn test_get_and_exists_together() {
    let (collection, id, _) = setup_doc(customer_doc());
    let outcome = collection
        .lookup_in(
            &id,
            &[
                LookupOp::get("addresses.delivery.country"),
                LookupOp::exists("purchases.pending[-1]"),
            ],
        )
        .unwrap();
    assert_eq!(outcome.content_as::<String>(0).unwrap(), "United Kingdom");
    assert!(!outcome.content_as::<bool>(1).unwrap());
}

#[test]
fn test_typed_decode_of_subtree() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Address {
        line1: String,
        line2: String,
        country: String,
    }

    let (collection, id, _) = setup_doc(customer_doc());
    let outcome = collection
        .lookup_in(&id, &[LookupOp::get("addresses.billing")])
        .unwrap();
    let address: Address = outcome.content_as(0).unwrap();
    assert_eq!(address.country, "United Kingdom");
    assert!(outcome.content_as::<Vec<i64>>(0).is_err());
}

// =============================================================================
// Dictionary mutations
// =============================================================================

#[test]
fn test_upsert_new_field() {
    let (collection, id, _) = setup_doc(customer_doc());
    mutate(&collection, &id, &[MutateOp::upsert("fax", "311-555-0151")]).unwrap();
    let (body, _) = stored_json(&collection, &id);
    assert_eq!(body["fax"], "311-555-0151");
}

#[test]
fn test_insert_existing_field_fails() {
    let (collection, id, _) = setup_doc(customer_doc());
    let result = mutate(&collection, &id, &[MutateOp::insert("purchases.complete", json!([42, true, "None"]))]);
    assert_multi_failure(result, 0, SubdocErrorKind::PathExists);
}

#[test]
fn test_upsert_into_array_is_mismatch() {
    let (collection, id, cas) = setup_doc(json!({"tags": ["reno", "nevada"]}));
    let result = mutate(&collection, &id, &[MutateOp::upsert("tags.sierra", true)]);
    assert_multi_failure(result, 0, SubdocErrorKind::PathMismatch);
    assert_eq!(
        stored_json(&collection, &id),
        (json!({"tags": ["reno", "nevada"]}), cas)
    );
}

#[test]
fn test_remove_then_replace() {
    let (collection, id, _) = setup_doc(customer_doc());
    mutate(
        &collection,
        &id,
        &[
            MutateOp::remove("addresses.billing"),
            MutateOp::replace("email", "dougr96@hotmail.com"),
        ],
    )
    .unwrap();
    let (body, _) = stored_json(&collection, &id);
    assert!(body["addresses"].get("billing").is_none());
    assert_eq!(body["email"], "dougr96@hotmail.com");
}

#[test]
fn test_insert_create_parents() {
    let phone = json!({"num": "311-555-0101", "ext": 16});

    let (collection, id, _) = setup_doc(json!({}));
    let result = mutate(
        &collection,
        &id,
        &[MutateOp::insert("level_0.level_1.foo.bar.phone", phone.clone())],
    );
    assert_multi_failure(result, 0, SubdocErrorKind::PathNotFound);

    mutate(
        &collection,
        &id,
        &[MutateOp::insert("level_0.level_1.foo.bar.phone", phone.clone()).create_parents(true)],
    )
    .unwrap();
    let outcome = collection
        .lookup_in(&id, &[LookupOp::get("level_0.level_1.foo.bar.phone.ext")])
        .unwrap();
    assert_eq!(outcome.content_as::<i64>(0).unwrap(), 16);
}

// =============================================================================
// Array mutations
// =============================================================================

#[test]
fn test_array_append_to_purchases() {
    let (collection, id, _) = setup_doc(json!({"purchases": {"complete": [339, 976, 442, 666]}}));
    mutate(
        &collection,
        &id,
        &[MutateOp::array_append("purchases.complete", [777i64])],
    )
    .unwrap();
    let (body, _) = stored_json(&collection, &id);
    assert_eq!(body["purchases"]["complete"], json!([339, 976, 442, 666, 777]));
}

#[test]
fn test_array_prepend_to_abandoned() {
    let (collection, id, _) = setup_doc(customer_doc());
    mutate(
        &collection,
        &id,
        &[MutateOp::array_prepend("purchases.abandoned", [18i64])],
    )
    .unwrap();
    let (body, _) = stored_json(&collection, &id);
    assert_eq!(body["purchases"]["abandoned"], json!([18, 157, 42, 999]));
}

#[test]
fn test_root_array_document() {
    let store = Arc::new(InMemoryStore::new());
    let id = DocId::new("my_array");
    store
        .upsert(&id, DocumentContent::Json(JsonValue::from(json!([]))))
        .unwrap();
    let collection = Collection::new(store);

    mutate(&collection, &id, &[MutateOp::array_append("", ["some element"])]).unwrap();
    mutate(&collection, &id, &[MutateOp::array_append("", ["elem1", "elem2", "elem3"])]).unwrap();
    mutate(
        &collection,
        &id,
        &[MutateOp::array_append("", [json!(["nested1", "nested2"])])],
    )
    .unwrap();

    let (body, _) = stored_json(&collection, &id);
    assert_eq!(
        body,
        json!(["some element", "elem1", "elem2", "elem3", ["nested1", "nested2"]])
    );
}

#[test]
fn test_array_append_create_parents() {
    let (collection, id, _) = setup_doc(json!({}));
    let result = mutate(
        &collection,
        &id,
        &[MutateOp::array_append("some.array", ["Hello", "World"])],
    );
    assert_multi_failure(result, 0, SubdocErrorKind::PathNotFound);

    mutate(
        &collection,
        &id,
        &[MutateOp::array_append("some.array", ["Hello", "World"]).create_parents(true)],
    )
    .unwrap();
    let (body, _) = stored_json(&collection, &id);
    assert_eq!(body, json!({"some": {"array": ["Hello", "World"]}}));
}

#[test]
fn test_add_unique_twice() {
    let store = Arc::new(InMemoryStore::new());
    let id = DocId::new("unique");
    store
        .upsert(&id, DocumentContent::Json(JsonValue::from(json!([]))))
        .unwrap();
    let collection = Collection::new(store);

    mutate(&collection, &id, &[MutateOp::array_add_unique("", 95i64)]).unwrap();
    let result = mutate(&collection, &id, &[MutateOp::array_add_unique("", 95i64)]);
    assert_multi_failure(result, 0, SubdocErrorKind::PathExists);

    let (body, _) = stored_json(&collection, &id);
    assert_eq!(body, json!([95]));
}

#[test]
fn test_add_unique_type_rules() {
    assert_eq!(
        single_failure(json!({"a": [1, 2]}), MutateOp::array_add_unique("a", json!([3]))),
        SubdocErrorKind::CannotInsert
    );
    assert_eq!(
        single_failure(json!({"a": [{"x": 1}]}), MutateOp::array_add_unique("a", 3i64)),
        SubdocErrorKind::PathMismatch
    );
    assert_eq!(
        single_success(json!({"a": [null, true, "s"]}), MutateOp::array_add_unique("a", 1i64)),
        json!({"a": [null, true, "s", 1]})
    );
}

#[test]
fn test_array_insert_scenario() {
    let doc = json!({"some": {"array": ["Hello", "World"]}});
    assert_eq!(
        single_success(doc.clone(), MutateOp::array_insert("some.array[1]", ["Cruel"])),
        json!({"some": {"array": ["Hello", "Cruel", "World"]}})
    );
    assert_eq!(
        single_failure(doc, MutateOp::array_insert("some.array[5]", ["Cruel"])),
        SubdocErrorKind::PathNotFound
    );
}

// =============================================================================
// Document-level errors
// =============================================================================

#[test]
fn test_missing_document() {
    let (collection, _, _) = setup_doc(json!({}));
    let missing = DocId::new("customer999");
    let err = collection
        .lookup_in(&missing, &[LookupOp::get("name")])
        .unwrap_err();
    assert_eq!(err, Error::DocumentNotFound(missing.clone()));

    let err = mutate(&collection, &missing, &[MutateOp::upsert("name", "x")]).unwrap_err();
    assert_eq!(err, Error::DocumentNotFound(missing));
}

#[test]
fn test_binary_document() {
    let store = Arc::new(InMemoryStore::new());
    let id = DocId::new("image");
    store
        .upsert(&id, DocumentContent::Binary(b"\x89PNG".to_vec()))
        .unwrap();
    let collection = Collection::new(store);
    let err = collection.lookup_in(&id, &[LookupOp::get("a")]).unwrap_err();
    assert_eq!(err, Error::DocumentNotJson(id));
}
