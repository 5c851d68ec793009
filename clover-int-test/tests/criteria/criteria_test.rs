use clover::collection::Document;
use clover::criteria::{row, Criteria};
use clover::errors::CloverResult;
use clover::Clover;
use clover_int_test::test_util::{
    bool_field, cleanup, create_test_context, int_field, run_test, seed_todos,
};

const TODO_COUNT: usize = 200;

/// Runs `criteria` against the seeded todos and checks every result with
/// `expected`, and that no document outside the result satisfies it.
fn check(db: &Clover, criteria: Criteria, expected: impl Fn(&Document) -> bool) -> CloverResult<usize> {
    let all = db.query("todos").find_all()?;
    let found = db.query("todos").filter(criteria.clone()).find_all()?;

    for document in &found {
        assert!(expected(document), "{} should not match {}", document, criteria);
    }
    let expected_count = all.iter().filter(|d| expected(d)).count();
    assert_eq!(found.len(), expected_count, "wrong count for {}", criteria);
    Ok(found.len())
}

#[test]
fn test_eq() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;
            let completed = check(&db, row("completed").eq(true), |d| bool_field(d, "completed"))?;
            let pending = check(&db, row("completed").eq(false), |d| !bool_field(d, "completed"))?;
            assert_eq!(completed + pending, TODO_COUNT);
            assert!(completed > 0 && pending > 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_neq() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;
            let others = check(&db, row("userId").neq(7), |d| int_field(d, "userId") != 7)?;
            let sevens = db.query("todos").filter(row("userId").eq(7)).count()?;
            assert_eq!(others + sevens, TODO_COUNT);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_ranges() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;

            let gt = check(&db, row("userId").gt(4), |d| int_field(d, "userId") > 4)?;
            let lt_eq = check(&db, row("userId").lt_eq(4), |d| int_field(d, "userId") <= 4)?;
            assert_eq!(gt + lt_eq, TODO_COUNT);

            let gt_eq = check(&db, row("userId").gt_eq(4), |d| int_field(d, "userId") >= 4)?;
            let lt = check(&db, row("userId").lt(4), |d| int_field(d, "userId") < 4)?;
            assert_eq!(gt_eq + lt, TODO_COUNT);

            assert_eq!(db.query("todos").filter(row("userId").gt(10)).count()?, 0);
            assert_eq!(db.query("todos").filter(row("userId").gt_eq(1)).count()?, TODO_COUNT);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_in() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;
            let found = check(&db, row("userId").is_in(vec![5, 8]), |d| {
                matches!(int_field(d, "userId"), 5 | 8)
            })?;
            let fives = db.query("todos").filter(row("userId").eq(5)).count()?;
            let eights = db.query("todos").filter(row("userId").eq(8)).count()?;
            assert_eq!(found, fives + eights);

            let none: Vec<i32> = Vec::new();
            assert_eq!(db.query("todos").filter(row("userId").is_in(none)).count()?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_exists() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;
            let found = check(&db, row("completed_date").exists(), |d| d.has("completed_date"))?;
            assert_eq!(found, 1);
            let without = db.query("todos").filter(row("completed_date").exists().not()).count()?;
            assert_eq!(without, TODO_COUNT - 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_and_or() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;

            check(
                &db,
                row("completed").eq(true).and(row("userId").gt(2)),
                |d| bool_field(d, "completed") && int_field(d, "userId") > 2,
            )?;
            check(
                &db,
                row("userId").eq(1).or(row("userId").eq(10)),
                |d| matches!(int_field(d, "userId"), 1 | 10),
            )?;
            check(
                &db,
                row("completed")
                    .eq(true)
                    .and(row("userId").lt(3).or(row("userId").gt(8))),
                |d| {
                    let user = int_field(d, "userId");
                    bool_field(d, "completed") && (user < 3 || user > 8)
                },
            )?;
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_mismatched_types_never_match_ranges() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", TODO_COUNT, 42)?;

            assert_eq!(db.query("todos").filter(row("title").gt(3)).count()?, 0);
            assert_eq!(db.query("todos").filter(row("userId").lt("z")).count()?, 0);
            assert_eq!(db.query("todos").filter(row("missing").lt_eq(3)).count()?, 0);
            assert_eq!(db.query("todos").filter(row("completed").eq(1)).count()?, 0);
            assert_eq!(db.query("todos").filter(row("missing").neq(3)).count()?, TODO_COUNT);
            Ok(())
        },
        cleanup,
    )
}
