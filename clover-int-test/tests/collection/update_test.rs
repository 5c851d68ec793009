use clover::common::Value;
use clover::criteria::row;
use clover::doc;
use clover_int_test::test_util::{
    bool_field, cleanup, create_test_context, int_field, run_test, seed_todos,
};

#[test]
fn test_update_matching_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            let pending = row("completed").eq(false).and(row("userId").eq(3));
            let expected = db.query("todos").filter(pending.clone()).count()?;

            let result = db
                .query("todos")
                .filter(pending)
                .update(&doc! { completed: true, review: { by: "ann" } })?;
            assert_eq!(result.affected_count(), expected);

            for id in result.affected_document_ids() {
                let todo = db.find_by_id("todos", id)?.unwrap();
                assert!(bool_field(&todo, "completed"));
                assert_eq!(int_field(&todo, "userId"), 3);
                assert_eq!(todo.get("review.by").and_then(Value::as_str), Some("ann"));
            }

            let user3 = db.query("todos").filter(row("userId").eq(3)).find_all()?;
            assert!(user3.iter().all(|d| bool_field(d, "completed")));
            assert_eq!(db.query("todos").count()?, 200);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_with_closure() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("counters")?;
            db.insert("counters", (0..10).map(|i| doc! { n: i }).collect())?;

            let result = db
                .query("counters")
                .filter(row("n").gt_eq(5))
                .update_with(|d| {
                    let n = d.get("n").and_then(Value::as_i64).unwrap_or_default();
                    d.set("n", n * 10);
                })?;
            assert_eq!(result.affected_count(), 5);

            let mut values: Vec<i64> = db
                .query("counters")
                .find_all()?
                .iter()
                .map(|d| int_field(d, "n"))
                .collect();
            values.sort();
            assert_eq!(values, vec![0, 1, 2, 3, 4, 50, 60, 70, 80, 90]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_keeps_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;
            let id = db.insert_one("items", doc! { n: 1 })?;

            db.query("items").update(&doc! { "_id": "other", n: 2 })?;
            let item = db.find_by_id("items", &id)?.unwrap();
            assert_eq!(int_field(&item, "n"), 2);
            assert_eq!(db.query("items").count()?, 1);
            Ok(())
        },
        cleanup,
    )
}
