use clover::collection::Document;
use clover::common::Value;
use clover::doc;
use clover_int_test::test_util::random_path;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_set_then_get_random_paths() {
    let mut rng = StdRng::seed_from_u64(7);

    for i in 0..500 {
        let path = random_path(&mut rng);
        assert!(path.starts_with('.'));

        let mut document = Document::new();
        document.set(&path, i);
        assert!(document.has(&path), "{} missing after set", path);
        assert_eq!(document.get(&path), Some(&Value::Number(i as f64)));
    }
}

#[test]
fn test_random_paths_accumulate_in_one_document() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut document = Document::new();
    let mut written = Vec::new();

    for i in 0..200 {
        // a unique second segment keeps every write in its own subtree
        let path = format!(".n{}{}", i, random_path(&mut rng));
        document.set(&path, i);
        written.push((path, i));
    }

    for (path, value) in &written {
        assert_eq!(document.get(path).and_then(Value::as_i64), Some(*value as i64));
    }
    assert_eq!(document.fields().len(), written.len());
}

#[test]
fn test_integers_are_stored_as_floats() {
    let document = doc! { small: 3, big: 4_000_000_000_i64, ratio: 0.5 };
    assert_eq!(document.get("small"), Some(&Value::Number(3.0)));
    assert_eq!(document.get("big"), Some(&Value::Number(4_000_000_000.0)));
    assert_eq!(document.get("ratio").and_then(Value::as_f64), Some(0.5));
}

#[test]
fn test_get_through_scalar_is_absent() {
    let mut document = doc! { a: 1 };
    assert!(!document.has("a.b"));
    assert_eq!(document.get("a.b.c"), None);

    document.set("a.b", 2);
    assert_eq!(document.get("a.b").and_then(Value::as_i64), Some(2));
    assert_eq!(document.fields().to_vec(), vec!["a.b".to_string()]);
}

#[test]
fn test_remove_nested_path() {
    let mut document = doc! { user: { name: "ann", age: 30 } };
    assert_eq!(document.remove("user.age"), Some(Value::Number(30.0)));
    assert!(!document.has("user.age"));
    assert!(document.has("user.name"));
    assert_eq!(document.remove("user.age"), None);
}
