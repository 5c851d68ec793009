use clover::collection::Document;
use clover::common::Value;
use clover::doc;
use clover::errors::CloverResult;
use clover::Clover;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::backtrace::Backtrace;
use std::thread;
use std::time::{Duration, Instant};

pub const TODO_TITLES: [&str; 8] = [
    "buy milk",
    "walk the dog",
    "water plants",
    "pay rent",
    "call mom",
    "fix bike",
    "read a book",
    "clean garage",
];

/// Runs a test with retry logic and error handling.
///
/// `before` builds a fresh context for every attempt and `after` is called
/// even when the test body returns an error.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> CloverResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> CloverResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> CloverResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error: Option<String> = None;
    let mut last_backtrace: Option<String> = None;

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let backtrace = Backtrace::capture();
            match before() {
                Ok(ctx) => match test(ctx.clone()) {
                    Ok(_) => after(ctx)
                        .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                    Err(e) => {
                        let _ = after(ctx);
                        Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                    }
                },
                Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
            }
        });

        let elapsed = start_time.elapsed();

        let (message, backtrace) = match result {
            Ok(Ok(_)) => return,
            Ok(Err((e, bt))) => (e, bt),
            Err(panic_err) => {
                let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
            }
        };

        if attempt < MAX_RETRIES {
            eprintln!(
                "\n========== Test Attempt {}/{} Failed (took {:?}) ==========",
                attempt, MAX_RETRIES, elapsed
            );
            eprintln!("{}", message);
            eprintln!("Retrying in {}ms...\n", 100 * attempt);
            thread::sleep(Duration::from_millis(100 * attempt as u64));
        }
        last_error = Some(message);
        last_backtrace = Some(backtrace);
    }

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {} attempts", MAX_RETRIES);
    eprintln!("Last error: {}", last_error.as_deref().unwrap_or("Unknown"));
    if let Some(bt) = &last_backtrace {
        if !bt.is_empty() && !bt.contains("disabled") {
            eprintln!("\nBacktrace:\n{}", bt);
        }
    }
    eprintln!("=====================================================\n");

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES,
        last_error.unwrap_or_default()
    );
}

#[derive(Clone)]
pub struct TestContext {
    db: Clover,
}

impl TestContext {
    pub fn new(db: Clover) -> Self {
        Self { db }
    }

    pub fn db(&self) -> Clover {
        self.db.clone()
    }
}

pub fn create_test_context() -> CloverResult<TestContext> {
    let db = Clover::builder().open()?;
    Ok(TestContext::new(db))
}

pub fn cleanup(ctx: TestContext) -> CloverResult<()> {
    ctx.db().close()
}

/// Creates `name` and fills it with `count` todo documents drawn from a
/// seeded generator.
///
/// `userId` ranges over 1..=10 and `completed` is a fair coin. Exactly one
/// document, the first, carries a `completed_date`.
pub fn seed_todos(db: &Clover, name: &str, count: usize, seed: u64) -> CloverResult<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut todos = Vec::with_capacity(count);
    for i in 0..count {
        let title = TODO_TITLES[rng.random_range(0..TODO_TITLES.len())];
        let mut todo = doc! {
            id: (i as i64),
            userId: (rng.random_range(1..=10) as i64),
            title: title,
            completed: (rng.random_bool(0.5)),
        };
        if i == 0 {
            todo.set("completed_date", "2021-03-14");
        }
        todos.push(todo);
    }

    db.create_collection(name)?;
    db.insert(name, todos)?;
    Ok(())
}

/// Copies every document of `source` into a new collection `target`,
/// keeping their ids.
pub fn copy_collection(db: &Clover, source: &str, target: &str) -> CloverResult<()> {
    let documents = db.query(source).find_all()?;
    db.create_collection(target)?;
    db.insert(target, documents)?;
    Ok(())
}

/// Generates a dotted path of one to four random lowercase segments,
/// always starting with the separator.
pub fn random_path(rng: &mut StdRng) -> String {
    let depth = rng.random_range(1..=4);
    let mut path = String::new();
    for _ in 0..depth {
        path.push('.');
        let len = rng.random_range(1..=6);
        for _ in 0..len {
            path.push(rng.random_range(b'a'..=b'z') as char);
        }
    }
    path
}

/// Reads a numeric field as an integer, panicking with the document when it
/// is missing.
pub fn int_field(document: &Document, path: &str) -> i64 {
    match document.get(path).and_then(Value::as_i64) {
        Some(value) => value,
        None => panic!("{} has no numeric {}", document, path),
    }
}

pub fn bool_field(document: &Document, path: &str) -> bool {
    match document.get(path).and_then(Value::as_bool) {
        Some(value) => value,
        None => panic!("{} has no boolean {}", document, path),
    }
}
