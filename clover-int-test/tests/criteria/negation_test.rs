use clover::collection::DocumentId;
use clover::criteria::{row, Criteria};
use clover::errors::CloverResult;
use clover::Clover;
use clover_int_test::test_util::{cleanup, create_test_context, run_test, seed_todos};

fn ids(db: &Clover, criteria: Criteria) -> CloverResult<Vec<DocumentId>> {
    Ok(db
        .query("todos")
        .filter(criteria)
        .find_all()?
        .iter()
        .filter_map(|d| d.id())
        .collect())
}

fn criteria_set() -> Vec<Criteria> {
    vec![
        row("completed").eq(true),
        row("userId").neq(7),
        row("userId").gt(4),
        row("userId").lt_eq(2),
        row("userId").is_in(vec![5, 8]),
        row("completed_date").exists(),
        row("completed").eq(true).and(row("userId").gt(2)),
        row("userId").eq(1).or(row("title").eq("pay rent")),
    ]
}

#[test]
fn test_double_negation() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            for criteria in criteria_set() {
                let plain = ids(&db, criteria.clone())?;
                let doubled = ids(&db, criteria.not().not())?;
                assert_eq!(plain, doubled, "not(not({})) differs", criteria);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_negation_partitions() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            for criteria in criteria_set() {
                let matched = ids(&db, criteria.clone())?;
                let rest = ids(&db, criteria.not())?;
                assert_eq!(matched.len() + rest.len(), 200, "{}", criteria);
                assert!(matched.iter().all(|id| !rest.contains(id)));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_de_morgan() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            seed_todos(&db, "todos", 200, 42)?;

            let a = row("completed").eq(true);
            let b = row("userId").gt(5);
            let left = ids(&db, a.and(b.clone()).not())?;
            let right = ids(&db, a.not().or(b.not()))?;
            assert_eq!(left, right);
            Ok(())
        },
        cleanup,
    )
}
