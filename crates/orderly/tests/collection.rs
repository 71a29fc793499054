//! End-to-end behavior of stores through the public facade.

use orderly::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn values<V: Clone>(store: &Store<V>) -> Vec<V> {
    store.read().values().cloned().collect()
}

fn keys<V>(store: &Store<V>) -> Vec<Key> {
    store.read().keys().cloned().collect()
}

fn record(pairs: &[(&str, Value)]) -> Value {
    let mut array: Array<Value> = Array::new();
    for (name, value) in pairs {
        array.insert(*name, value.clone());
    }
    Value::from(array)
}

// ============================================================================
// Access and mutation
// ============================================================================

#[test]
fn test_insert_then_get() -> anyhow::Result<()> {
    let mut store: Store = Store::new();
    store.insert("test", Value::from("value"));
    store.insert(7, Value::Int(7));

    assert_eq!(store.get("test")?, Value::from("value"));
    assert_eq!(store.get("7")?, Value::Int(7));
    assert!(matches!(
        store.get("missing"),
        Err(CollectionError::KeyNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_push_follows_largest_integer_key() -> anyhow::Result<()> {
    let mut store: Store = Store::new();
    store.insert(5, Value::from("five"));
    store.push(Value::from("six"))?;
    store.remove(6);
    store.push(Value::from("seven"))?;

    assert_eq!(keys(&store), vec![Key::Int(5), Key::Int(7)]);
    assert_eq!(store.get(7)?, Value::from("seven"));
    Ok(())
}

#[test]
fn test_push_after_largest_key_is_refused() {
    init_tracing();
    let mut store: Store = Store::new();
    store.insert(i64::MAX, Value::from("last"));

    assert!(matches!(
        store.push(Value::from("lost")),
        Err(CollectionError::InvalidArgument(_))
    ));
    assert_eq!(store.count(), 1);
    assert_eq!(store.get(i64::MAX).ok(), Some(Value::from("last")));
}

#[test]
fn test_subscript_assignment_upserts() {
    let mut array: Array<Value> = Array::from_values([1, 2]);
    array[1] = Value::Int(20);
    array["extra"] = Value::from("new");
    *array.get_or_insert_with("count", || Value::Int(0)) = Value::Int(1);

    let store = Store::from_array(array);
    assert_eq!(
        keys(&store),
        vec![Key::Int(0), Key::Int(1), Key::from("extra"), Key::from("count")]
    );
    assert_eq!(values(&store)[1], Value::Int(20));
}

#[test]
fn test_push_on_top_renumbers_integer_keys() {
    let mut store: Store = Store::from_pairs([(Key::Int(4), "a"), (Key::from("name"), "b")]);
    store.push_on_top(Value::from("top"));

    assert_eq!(keys(&store), vec![Key::Int(0), Key::Int(1), Key::from("name")]);
    assert_eq!(store.first(), Some(Value::from("top")));
}

#[test]
fn test_pop_and_shift() {
    let mut store: Store<i64> = Store::from_values([1, 2, 3]);
    assert_eq!(store.pop(), Some(3));
    assert_eq!(store.shift(), Some(1));
    assert_eq!(store.entries(), vec![(Key::Int(0), 2)]);

    let mut empty: Store<i64> = Store::new();
    assert_eq!(empty.pop(), None);
    assert_eq!(empty.shift(), None);
}

#[test]
fn test_pull_removes_and_returns() {
    let mut store: Store = Store::from_pairs([("a", 1), ("b", 2)]);
    assert_eq!(store.pull("a"), Some(Value::Int(1)));
    assert_eq!(store.pull("a"), None);
    assert_eq!(store.count(), 1);
}

#[test]
fn test_reverse_renumbers() {
    let mut store: Store = Store::from_pairs([(Key::Int(0), "x"), (Key::from("k"), "y"), (Key::Int(1), "z")]);
    store.reverse();
    assert_eq!(keys(&store), vec![Key::Int(0), Key::from("k"), Key::Int(1)]);
    assert_eq!(
        values(&store),
        vec![Value::from("z"), Value::from("y"), Value::from("x")]
    );
}

#[test]
fn test_concat_overwrite_and_keep() {
    let incoming: Array<i64> = Array::from_values([4, 5, 6]);

    let mut overwrite: Store<i64> = Store::from_values([1, 2, 3]);
    overwrite.concat(&incoming, true);
    assert_eq!(values(&overwrite), vec![4, 5, 6]);

    let mut keep: Store<i64> = Store::from_values([1, 2, 3]);
    keep.concat(&incoming, false);
    assert_eq!(values(&keep), vec![1, 2, 3]);
}

#[test]
fn test_concat_store_with_itself() {
    let shared = SharedArray::new(Array::from_pairs([("a", 1), ("b", 2)]));
    let mut left: Store<i64> = Store::alias(&shared);
    let right: Store<i64> = Store::alias(&shared);

    left.concat_store(&right, true);
    assert_eq!(left.count(), 2);
    assert_eq!(shared.borrow().len(), 2);
}

// ============================================================================
// Ownership modes
// ============================================================================

#[test]
fn test_aliased_store_sees_caller_mutations() {
    init_tracing();
    let shared = SharedArray::new(Array::from_values([Value::Int(1), Value::Int(2), Value::Int(3)]));
    let store: Store = Store::alias(&shared);

    shared.borrow_mut().remove(&Key::Int(0));
    assert_eq!(store.count(), 2);
    assert_eq!(store.ownership(), Ownership::Aliased);
}

#[test]
fn test_caller_sees_aliased_store_mutations() {
    let shared: SharedArray<i64> = SharedArray::new(Array::from_values([1, 2, 3, 4, 5]));
    let mut store = Store::alias(&shared);

    store.filter(|value, _| *value > 3);
    assert_eq!(shared.borrow().len(), 2);

    store.clear();
    assert!(shared.borrow().is_empty());
}

#[test]
fn test_owned_store_is_independent() {
    let mut source: Array<i64> = Array::from_values([1, 2, 3]);
    let store = Store::copied_from(&source);
    source.remove(&Key::Int(0));

    assert_eq!(store.count(), 3);
    assert_eq!(store.ownership(), Ownership::Owned);
}

#[test]
fn test_copy_of_aliased_store_is_owned() {
    let shared: SharedArray<i64> = SharedArray::new(Array::from_values([1, 2, 3, 4]));
    let store = Store::alias(&shared);
    let copy = store.copy();

    shared.borrow_mut().remove(&Key::Int(0));
    assert_eq!(store.count(), 3);
    assert_eq!(copy.count(), 4);
    assert!(!copy.is_aliased());
}

#[test]
fn test_extract_on_aliased_store_removes_from_caller() {
    let shared = SharedArray::new(Array::from_pairs([("a", "one"), ("b", "two"), ("c", "three")]));
    let mut store: Store = Store::alias(&shared);

    let extracted = store.extract(["a", "b", "z"]);
    assert_eq!(extracted.get("a").ok().flatten(), Some(Value::from("one")));
    assert_eq!(extracted.get("z").ok().flatten(), None);
    assert!(extracted.key_exists("z"));

    assert_eq!(shared.borrow().len(), 1);
    assert!(shared.borrow().contains_key(&Key::from("c")));
}

#[test]
fn test_unwrap_rejects_scalars() -> anyhow::Result<()> {
    let mut list = Value::from(vec![1, 2]);
    Store::unwrap(&mut list)?.push(Value::Int(3))?;
    assert_eq!(list.as_array().map(Array::len), Some(3));

    let mut text = Value::from("test");
    assert!(matches!(
        Store::unwrap(&mut text),
        Err(CollectionError::NotCollectionOrArray { .. })
    ));
    Ok(())
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_find_returns_stored_false() {
    let store: Store = Store::from_values([Value::Int(1), Value::Bool(false)]);
    let found = store.find(|value, _| value.as_bool().is_some());
    assert_eq!(found, Some(Value::Bool(false)));
    assert_eq!(store.find_index(|value, _| value.is_null()), None);
}

#[test]
fn test_find_closest_order() {
    init_tracing();
    let store: Store = Store::from_values(["test", "abc", "bla"]);
    let closest = store.find_closest(None, "abc", None);

    let scored: Vec<(usize, Value)> = values(&closest)
        .into_iter()
        .map(|hit| (hit.score, hit.entry))
        .collect();
    assert_eq!(
        scored,
        vec![
            (0, Value::from("abc")),
            (2, Value::from("bla")),
            (4, Value::from("test")),
        ]
    );
    assert_eq!(store.find_closest_one(None, "abc", None), Some(Value::from("abc")));
}

#[test]
fn test_index_of_with_equality_modes() {
    let store: Store = Store::from_values([Value::from("2"), Value::Int(2)]);
    assert_eq!(store.index_of(&Value::Int(2), Equality::Strict), Some(Key::Int(1)));
    assert_eq!(store.index_of(&Value::Int(2), Equality::Loose), Some(Key::Int(0)));
}

// ============================================================================
// Transformations
// ============================================================================

#[test]
fn test_flatten_nested_records() {
    let mut store: Store = Store::from_pairs([
        (Key::from("test"), Value::from("value")),
        (
            Key::from("another"),
            record(&[
                ("subtest", Value::from("subvalue")),
                ("subsubarr", Value::from(vec![1, 2, 3])),
            ]),
        ),
    ]);

    store.flatten(usize::MAX).unwrap();
    assert_eq!(store.count(), 5);
    assert!(store.key_exists("subtest"));
    assert!(!store.key_exists("another"));
    assert_eq!(store.get(0).ok(), Some(Value::Int(1)));
}

#[test]
fn test_flip_twice_restores_unique_mapping() {
    let original: Store = Store::from_pairs([("a", "x"), ("b", "y")]);
    let mut flipped = original.copy();
    flipped.flip();
    assert_eq!(flipped.get("x").ok(), Some(Value::from("a")));

    flipped.flip();
    assert_eq!(flipped, original);
}

#[test]
fn test_map_filter_chain() {
    let mut store: Store<i64> = Store::from_values([1, 2, 3, 4, 5]);
    store.map(|value, _| value * 2).filter(|value, _| *value > 5);
    assert_eq!(
        store.entries(),
        vec![(Key::Int(2), 6), (Key::Int(3), 8), (Key::Int(4), 10)]
    );
}

#[test]
fn test_select_windows() {
    let store: Store<i64> = Store::from_values([1, 2, 3, 4, 5]);
    assert_eq!(values(&store.select(Some(2), None)), vec![1, 2]);
    assert_eq!(values(&store.select(None, Some(3))), vec![4, 5]);
    assert_eq!(keys(&store.select(Some(2), Some(1))), vec![Key::Int(0), Key::Int(1)]);
    assert_eq!(store.count(), 5);
}

#[test]
fn test_nth_and_only() -> anyhow::Result<()> {
    let store: Store<i64> = Store::from_values(1..=7);
    assert_eq!(values(&store.nth(3, false)?), vec![1, 4, 7]);
    assert_eq!(keys(&store.nth(3, true)?), vec![Key::Int(0), Key::Int(3), Key::Int(6)]);
    assert_eq!(values(&store.only([1, 40])), vec![2]);
    Ok(())
}

#[test]
fn test_unique_and_join() {
    let store: Store = Store::from_values([Value::Int(1), Value::from("1"), Value::Int(2)]);
    assert_eq!(store.unique(SortFlags::Regular).count(), 2);
    assert_eq!(store.unique(SortFlags::String).join("-"), "1-2");
    assert_eq!(store.join_default(), "1,1,2");
}

#[test]
fn test_unique_by_key_projects_field() {
    let store: Store = Store::from_values([
        record(&[("city", Value::from("kiel"))]),
        record(&[("city", Value::from("bonn"))]),
        Value::Int(3),
        record(&[("city", Value::from("kiel"))]),
    ]);

    let cities = store.unique_by_key("city", SortFlags::Regular);
    assert_eq!(values(&cities), vec![Value::from("kiel"), Value::from("bonn")]);
}

// ============================================================================
// Partitioning, aggregation and sorting
// ============================================================================

#[test]
fn test_chunk_sizes() -> anyhow::Result<()> {
    let store: Store<i64> = Store::from_values(1..=7);
    let chunks = store.chunk(2)?;

    let sizes: Vec<usize> = chunks.read().values().map(Store::count).collect();
    assert_eq!(sizes, vec![2, 2, 2, 1]);
    assert!(!chunks.key_exists(4));
    Ok(())
}

#[test]
fn test_split_keeps_keys() -> anyhow::Result<()> {
    let store: Store<i64> = Store::from_values([1, 2, 3, 4, 5]);
    let sides = store.split(|value, _| value % 2 == 0)?;

    assert_eq!(sides.get(0)?.entries(), vec![(Key::Int(1), 2), (Key::Int(3), 4)]);
    assert_eq!(
        sides.get(1)?.entries(),
        vec![(Key::Int(0), 1), (Key::Int(2), 3), (Key::Int(4), 5)]
    );
    Ok(())
}

#[test]
fn test_sum_and_average() -> anyhow::Result<()> {
    let mut store: Store = Store::from_values([1, 2, 3, 4, 5]);
    assert_eq!(store.sum(), 15.0);
    store.push(Value::Float(14.5)).unwrap();
    assert_eq!(store.sum(), 29.5);

    let tens: Store = Store::from_values([1, 1, 1, 1, 1, 5, 5, 5, 5, 5]);
    assert_eq!(tens.average()?, 3.0);
    Ok(())
}

#[test]
fn test_min_custom_skips_unprojected() {
    let store: Store = Store::from_values([
        record(&[("age", Value::Int(40))]),
        Value::from("no record"),
        record(&[("age", Value::Int(18))]),
    ]);

    let youngest = store.min_custom(|value, _| {
        value.field(&Key::from("age")).and_then(Value::as_number)
    });
    assert_eq!(youngest, Some(18.0));
    assert_eq!(store.max_child("age"), Some(40.0));
}

#[test]
fn test_sort_by_fields_is_stable() -> anyhow::Result<()> {
    let person = |name: &str, age: i64| {
        record(&[("name", Value::from(name)), ("age", Value::Int(age))])
    };
    let mut store: Store = Store::from_values([
        person("c", 30),
        person("a", 20),
        person("b", 30),
        person("d", 20),
    ]);

    store.sort_by_fields(&[(Key::from("age"), Direction::Ascending)])?;
    let names: Vec<Value> = values(&store)
        .iter()
        .filter_map(|entry| entry.field(&Key::from("name")).cloned())
        .collect();
    assert_eq!(
        names,
        vec![Value::from("a"), Value::from("d"), Value::from("c"), Value::from("b")]
    );
    assert_eq!(keys(&store), vec![Key::Int(1), Key::Int(3), Key::Int(0), Key::Int(2)]);
    Ok(())
}

#[test]
fn test_sort_anything_without_panicking() {
    let mut store: Store = Store::from_values([
        Value::Float(f64::NAN),
        Value::from(""),
        Value::Null,
        Value::Int(0),
        record(&[("a", Value::Int(1))]),
        Value::Bool(false),
        record(&[("b", Value::Int(1))]),
        Value::Float(f64::NAN),
        Value::from("0"),
    ]);

    store.sort_alphabetically();
    let sorted = values(&store);
    assert_eq!(sorted[0], Value::Null);
    assert_eq!(sorted[1], Value::Bool(false));
    assert!(sorted[4].is_nan() && sorted[5].is_nan());
    assert_eq!(sorted[6], Value::from(""));

    store.sort_numerical_desc();
    assert_eq!(store.count(), 9);
    assert!(values(&store)[0].is_nan());
}

#[test]
fn test_split_with_equal_labels_is_refused() {
    let store: Store<i64> = Store::from_values([1, 2, 3]);
    assert!(matches!(
        store.split_labeled(|value, _| *value > 1, "side", "side"),
        Err(CollectionError::InvalidArgument(_))
    ));
}

#[test]
fn test_sort_keep_keys_versus_rekey() {
    let mut kept: Store = Store::from_pairs([("x", 3), ("y", 1)]);
    kept.sort_numerical_keep_keys();
    assert_eq!(keys(&kept), vec![Key::from("y"), Key::from("x")]);

    let mut rekeyed: Store = Store::from_pairs([("x", 3), ("y", 1)]);
    rekeyed.sort_numerical();
    assert_eq!(keys(&rekeyed), vec![Key::Int(0), Key::Int(1)]);
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_cursor_treats_false_as_valid() {
    let mut store: Store = Store::from_values([Value::Bool(false), Value::Int(0)]);
    store.rewind();
    assert!(store.valid());
    assert_eq!(store.current(), Some(Value::Bool(false)));

    store.next();
    assert_eq!(store.key(), Some(Key::Int(1)));
    store.next();
    assert!(!store.valid());
    assert_eq!(store.current(), None);
}

#[test]
fn test_for_loop_visits_every_entry() {
    let mut store: Store<i64> = Store::from_pairs([("a", 1), ("b", 2)]);
    store.next();

    let mut seen = Vec::new();
    for (key, value) in &mut store {
        seen.push((key, value));
    }
    assert_eq!(seen, vec![(Key::from("a"), 1), (Key::from("b"), 2)]);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_json_roundtrip_keeps_order() -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(r#"{"b": 1, "a": [true, null], "c": "x"}"#)?;
    let store = Store::from_array(value.as_array().cloned().unwrap_or_default());

    assert_eq!(keys(&store), vec![Key::from("b"), Key::from("a"), Key::from("c")]);
    assert_eq!(
        store.get("a")?,
        Value::from(vec![Value::Bool(true), Value::Null])
    );

    let json = serde_json::to_string(&Value::from(store))?;
    assert_eq!(json, r#"{"b":1,"a":[true,null],"c":"x"}"#);
    Ok(())
}
