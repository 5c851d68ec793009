use clover::criteria::row;
use clover::doc;
use clover_int_test::test_util::{
    bool_field, cleanup, copy_collection, create_test_context, run_test, seed_todos,
};

#[test]
fn test_delete_completed_todos() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;
            copy_collection(&db, "todos", "todos-temp")?;

            let completed = row("completed").eq(true);
            let remaining = db.query("todos-temp").filter(completed.not()).count()?;

            let result = db.query("todos-temp").filter(completed.clone()).delete()?;
            assert_eq!(result.affected_count(), 200 - remaining);

            let left = db.query("todos-temp").find_all()?;
            assert_eq!(left.len(), remaining);
            assert!(left.iter().all(|d| !bool_field(d, "completed")));
            assert_eq!(db.query("todos-temp").filter(completed).count()?, 0);

            // the source collection is untouched
            assert_eq!(db.query("todos").count()?, 200);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_from_empty_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("empty")?;
            let result = db.query("empty").delete()?;
            assert!(result.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_with_no_match() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 50, 3)?;
            let result = db.query("todos").filter(row("userId").gt(100)).delete()?;
            assert_eq!(result.affected_count(), 0);
            assert_eq!(db.query("todos").count()?, 50);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_returns_affected_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;
            let ids = db.insert("items", vec![doc! { n: 1 }, doc! { n: 2 }, doc! { n: 3 }])?;

            let result = db.query("items").filter(row("n").is_in(vec![1, 3])).delete()?;
            assert_eq!(result.affected_document_ids(), &[ids[0].clone(), ids[2].clone()]);
            assert!(db.find_by_id("items", &ids[1])?.is_some());
            assert!(db.find_by_id("items", &ids[0])?.is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_by_id() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_collection("items")?;
            let id = db.insert_one("items", doc! { n: 1 })?;
            assert!(db.delete_by_id("items", &id)?);
            assert!(!db.delete_by_id("items", &id)?);
            assert_eq!(db.query("items").count()?, 0);
            Ok(())
        },
        cleanup,
    )
}
