use clover::collection::{order_by, Document, FindOptions};
use clover::common::SortOrder;
use clover::criteria::row;
use clover::doc;
use clover::errors::ErrorKind;
use clover_int_test::test_util::{
    cleanup, create_test_context, int_field, run_test, seed_todos,
};

fn is_even(document: &Document) -> bool {
    document
        .get("value")
        .and_then(|v| v.as_i64())
        .map(|v| v % 2 == 0)
        .unwrap_or(false)
}

#[test]
fn test_matches_even_values() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("numbers")?;
            db.insert("numbers", (0..100).map(|i| doc! { value: i }).collect())?;

            let evens = db.query("numbers").matches(is_even);
            assert_eq!(evens.count()?, 50);
            assert!(evens.find_all()?.iter().all(is_even));

            let odds = db.query("numbers").matches(|d| !is_even(d));
            assert_eq!(odds.count()?, 50);
            assert_eq!(db.query("numbers").count()?, 100);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_matches_with_criteria() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("numbers")?;
            db.insert("numbers", (0..100).map(|i| doc! { value: i }).collect())?;

            let found = db
                .query("numbers")
                .filter(row("value").lt(20))
                .matches(is_even)
                .find_all()?;
            assert_eq!(found.len(), 10);
            assert!(found.iter().all(|d| int_field(d, "value") < 20));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_complement_covers_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            let criteria = row("completed").eq(true).and(row("userId").gt(5));
            let matched = db.query("todos").filter(criteria.clone()).count()?;
            let rest = db.query("todos").filter(criteria.not()).count()?;
            assert_eq!(matched + rest, 200);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sort_skip_limit() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            let page = db
                .query("todos")
                .sort("id", SortOrder::Descending)
                .skip(10)
                .limit(5)
                .find_all()?;
            let ids: Vec<i64> = page.iter().map(|d| int_field(d, "id")).collect();
            assert_eq!(ids, vec![189, 188, 187, 186, 185]);

            let options = order_by("userId", SortOrder::Ascending).then_by("id", SortOrder::Ascending);
            let sorted = db.query("todos").with_options(options).find_all()?;
            assert_eq!(sorted.len(), 200);
            for pair in sorted.windows(2) {
                let a = (int_field(&pair[0], "userId"), int_field(&pair[0], "id"));
                let b = (int_field(&pair[1], "userId"), int_field(&pair[1], "id"));
                assert!(a < b);
            }

            let windowed = db.query("todos").with_options(FindOptions::new().skip(195).limit(10));
            assert_eq!(windowed.count()?, 5);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_queries_are_reusable() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("numbers")?;
            let query = db.query("numbers").filter(row("value").gt_eq(5));
            assert_eq!(query.count()?, 0);

            db.insert("numbers", (0..10).map(|i| doc! { value: i }).collect())?;
            assert_eq!(query.count()?, 5);
            assert!(query.exists()?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_missing_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let err = ctx.db().query("missing").count().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

            let err = ctx.db().query("missing").delete().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}
