use clover::collection::DocumentId;
use clover::common::{Value, DOC_ID};
use clover::doc;
use clover::errors::ErrorKind;
use clover_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_insert_and_read_back() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("myCollection")?;

            let id = db.insert_one("myCollection", doc! { hello: "clover" })?;
            let documents = db.query("myCollection").find_all()?;
            assert_eq!(documents.len(), 1);

            let document = &documents[0];
            assert_eq!(document.get("hello").and_then(Value::as_str), Some("clover"));
            assert_eq!(document.id(), Some(id));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_assigns_distinct_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;

            let documents = (0..50).map(|i| doc! { n: i }).collect();
            let ids = db.insert("items", documents)?;
            assert_eq!(ids.len(), 50);

            let mut sorted = ids.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 50);
            assert_eq!(sorted, ids);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_keeps_caller_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;

            let id = db.insert_one("items", doc! { "_id": "todo-1", title: "x" })?;
            assert_eq!(id, DocumentId::create_id("todo-1")?);

            let found = db.find_by_id("items", &id)?;
            assert_eq!(
                found.and_then(|d| d.get(DOC_ID).cloned()),
                Some(Value::from("todo-1"))
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_failed_batch_inserts_nothing() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;
            db.insert_one("items", doc! { "_id": "taken" })?;

            let result = db.insert("items", vec![doc! { n: 1 }, doc! { "_id": "taken" }]);
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::DuplicateId);
            assert_eq!(db.query("items").count()?, 1);

            let result = db.insert("items", vec![doc! { n: 2 }, doc! { "_id": 5 }]);
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
            assert_eq!(db.query("items").count()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_into_missing_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let result = ctx.db().insert_one("nope", doc! { a: 1 });
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}
