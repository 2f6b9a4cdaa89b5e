//! Integration tests for ordering, equality and the legacy quirk.

use core::cmp::Ordering;

use varia_value::{Value, value};

fn kind_ladder() -> Vec<Value> {
    // one value of each kind, in kind order
    vec![
        value!(null),
        value!(-3),
        value!(3u64),
        value!(0.5),
        value!("s"),
        value!(true),
        value!([1]),
        value!({ "k": 1 }),
    ]
}

#[test]
fn kind_order_is_total_across_kinds() {
    let ladder = kind_ladder();
    for (i, a) in ladder.iter().enumerate() {
        for (j, b) in ladder.iter().enumerate() {
            let expected = i.cmp(&j);
            assert_eq!(a.compare(b), expected, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn comparison_is_antisymmetric() {
    let samples = [
        value!(1),
        value!(2),
        value!("apple"),
        value!("banana"),
        value!([1, 2]),
        value!([1, 3]),
        value!({ "a": 1 }),
        value!({ "a": 2 }),
    ];
    for a in &samples {
        for b in &samples {
            match a.compare(b) {
                Ordering::Less => assert_eq!(b.compare(a), Ordering::Greater),
                Ordering::Greater => assert_eq!(b.compare(a), Ordering::Less),
                Ordering::Equal => assert_eq!(b.compare(a), Ordering::Equal),
            }
        }
    }
}

#[test]
fn strings_order_by_bytes_with_length_tiebreak() {
    assert_eq!(value!("ab").compare(&value!("b")), Ordering::Less);
    assert_eq!(value!("ab").compare(&value!("abc")), Ordering::Less);
    assert_eq!(value!("").compare(&value!("a")), Ordering::Less);
    assert!(value!("same") == value!("same"));
}

#[test]
fn containers_order_by_size_before_content() {
    // a lexicographically "bigger" but shorter array still sorts first
    let short = value!([9, 9]);
    let long = value!([1, 1, 1]);
    assert_eq!(short.compare(&long), Ordering::Less);

    let a = value!({ "k": 1, "l": 1 });
    let b = value!({ "k": 9 });
    assert_eq!(b.compare(&a), Ordering::Less);
}

#[test]
fn equal_size_containers_order_by_entries() {
    assert_eq!(value!([1, 2]).compare(&value!([1, 3])), Ordering::Less);
    assert_eq!(
        value!({ "a": 1 }).compare(&value!({ "b": 1 })),
        Ordering::Less
    );
    assert_eq!(
        value!({ "a": 1 }).compare(&value!({ "a": 2 })),
        Ordering::Less
    );
    assert_eq!(
        value!({ "a": 1 }).compare(&value!({ "a": 1 })),
        Ordering::Equal
    );
}

#[test]
fn deep_structures_compare_recursively() {
    let a = value!({ "outer": [1, { "inner": 1 }] });
    let b = value!({ "outer": [1, { "inner": 2 }] });
    assert_eq!(a.compare(&b), Ordering::Less);
    assert!(a == a.clone());
    assert!(a != b);
}

#[test]
fn legacy_eq_answers_less_than_for_scalars() {
    let cases = [
        (value!(1), value!(2)),
        (value!(1u64), value!(2u64)),
        (value!(1.5), value!(2.5)),
        (value!(false), value!(true)),
        (value!("a"), value!("b")),
    ];
    for (lo, hi) in &cases {
        // the quirk: "equality" is true exactly when lhs < rhs
        assert!(lo.legacy_eq(hi), "{lo:?} legacy_eq {hi:?}");
        assert!(!hi.legacy_eq(lo));
        assert!(!lo.legacy_eq(lo));
        // corrected equality disagrees on all three
        assert!(lo != hi);
        assert!(lo == lo);
    }
}

#[test]
fn legacy_eq_matches_corrected_for_null_and_kind_mismatch() {
    assert!(Value::NULL.legacy_eq(&Value::NULL));
    assert!(Value::NULL == Value::NULL);
    assert!(!value!(1).legacy_eq(&value!("1")));
    assert!(value!(1) != value!("1"));
}

#[test]
fn legacy_eq_on_containers_is_lexicographic_less() {
    // different sizes: answers size < size
    assert!(value!([1]).legacy_eq(&value!([1, 2])));
    assert!(!value!([1, 2]).legacy_eq(&value!([1])));
    // same size: answers entry-wise less-than
    assert!(value!([1, 2]).legacy_eq(&value!([1, 3])));
    assert!(!value!([1, 3]).legacy_eq(&value!([1, 2])));
    assert!(!value!([1, 2]).legacy_eq(&value!([1, 2])));
}

#[test]
fn partial_ord_agrees_with_compare_when_ordered() {
    let a = value!(1);
    let b = value!(2);
    assert!(a < b);
    assert!(b > a);
    assert!(a <= a.clone());

    let nan = value!(f64::NAN);
    assert_eq!(nan.partial_cmp(&nan), None);
    assert!(nan != nan);
    // compare() still gives a total answer for sorting purposes
    assert_eq!(nan.compare(&nan), Ordering::Equal);
}

#[test]
fn metadata_does_not_affect_equality() {
    use varia_value::CommentPlacement;

    let plain = value!(7);
    let mut annotated = value!(7);
    annotated.set_comment("// seven", CommentPlacement::Before);
    annotated.set_offset_start(12);
    assert!(plain == annotated);
    assert_eq!(plain.compare(&annotated), Ordering::Equal);
}
