//! Property-Based Tests
//!
//! Random documents, paths and batches against the batch-level guarantees:
//! lookups are pure, failed mutation batches leave no trace, and a
//! successful batch equals its operations applied one at a time.

use crate::test_utils::*;
use proptest::prelude::*;
use serde_json::Value;
use subdoc::PathComponent;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-c]", arb_json(), 0..4)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

fn arb_path() -> impl Strategy<Value = String> {
    let component = prop_oneof![
        3 => "[a-c]".prop_map(PathComponent::Field),
        1 => (0usize..4).prop_map(PathComponent::Index),
        1 => Just(PathComponent::LastIndex),
    ];
    prop::collection::vec(component, 0..4).prop_map(|components| {
        SubdocPath::from_components(components)
            .map(|path| path.to_string())
            .unwrap_or_default()
    })
}

fn arb_op() -> impl Strategy<Value = MutateOp> {
    (arb_path(), arb_json(), -100i64..100, any::<bool>(), 0u8..9).prop_map(
        |(path, value, delta, create, which)| {
            let op = match which {
                0 => MutateOp::upsert(path, value),
                1 => MutateOp::insert(path, value),
                2 => MutateOp::replace(path, value),
                3 => MutateOp::remove(path),
                4 => MutateOp::array_append(path, [value]),
                5 => MutateOp::array_prepend(path, [value]),
                6 => MutateOp::array_insert(path, [value]),
                7 => MutateOp::array_add_unique(path, value),
                _ => MutateOp::counter(path, delta),
            };
            op.create_parents(create)
        },
    )
}

fn arb_lookup() -> impl Strategy<Value = LookupOp> {
    (arb_path(), any::<bool>()).prop_map(|(path, exists)| {
        if exists {
            LookupOp::exists(path)
        } else {
            LookupOp::get(path)
        }
    })
}

proptest! {
    #[test]
    fn property_lookups_are_pure(
        document in arb_json(),
        ops in prop::collection::vec(arb_lookup(), 1..16),
    ) {
        let document = JsonValue::from(document);
        let before = document.clone();
        let first = evaluate_lookups(&document, &ops);
        let second = evaluate_lookups(&document, &ops);
        prop_assert_eq!(&document, &before);
        prop_assert_eq!(first.len(), ops.len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn property_failed_batch_leaves_store_untouched(
        document in arb_object(),
        ops in prop::collection::vec(arb_op(), 1..8),
    ) {
        let (collection, id, cas) = setup_doc(document.clone());
        let expected = evaluate_mutations(&JsonValue::from(document.clone()), &ops);

        match mutate(&collection, &id, &ops) {
            Ok(outcome) => {
                let expected = expected.unwrap();
                let (body, stored_cas) = stored_json(&collection, &id);
                prop_assert_eq!(body, expected.document.into_inner());
                prop_assert_eq!(Some(stored_cas), outcome.new_cas);
                prop_assert_eq!(outcome.results, expected.results);
            }
            Err(Error::MultiCommandFailure { index, kind }) => {
                let expected = expected.unwrap_err();
                prop_assert_eq!((index, kind), (expected.index, expected.kind));
                prop_assert_eq!(stored_json(&collection, &id), (document, cas));
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn property_batch_equals_sequential_application(
        document in arb_object(),
        ops in prop::collection::vec(arb_op(), 1..8),
    ) {
        let start = JsonValue::from(document);
        if let Ok(batch) = evaluate_mutations(&start, &ops) {
            let mut current = start;
            for (i, op) in ops.iter().enumerate() {
                let step = evaluate_mutations(&current, std::slice::from_ref(op));
                prop_assert!(step.is_ok(), "operation {} failed on its own", i);
                let step = step.unwrap();
                prop_assert_eq!(&step.results[0].value, &batch.results[i].value);
                current = step.document;
            }
            prop_assert_eq!(current, batch.document);
        }
    }

    #[test]
    fn property_rendered_paths_reparse(path in arb_path()) {
        let parsed: SubdocPath = path.parse().unwrap();
        prop_assert_eq!(parsed.to_string(), path);
    }
}
