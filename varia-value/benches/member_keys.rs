use divan::{Bencher, black_box};
use std::collections::BTreeMap;
use varia_value::{StaticStr, Value, ValueType};

fn main() {
    divan::main();
}

fn keys(entries: usize) -> Vec<String> {
    (0..entries).map(|i| format!("member_{i:04}")).collect()
}

// --- Insert benchmarks -----------------------------------------------------

#[divan::bench(args = [16, 64, 256, 512])]
fn insert_object_owned_keys(bencher: Bencher, entries: usize) {
    let keys = keys(entries);
    bencher.bench_local(|| {
        let mut obj = Value::new(ValueType::Object);
        for key in &keys {
            obj[key.as_str()] = Value::from(1i64);
        }
        black_box(obj)
    });
}

#[divan::bench(args = [16, 64, 256, 512])]
fn insert_string_map_baseline(bencher: Bencher, entries: usize) {
    let keys = keys(entries);
    bencher.bench_local(|| {
        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        for key in &keys {
            map.insert(key.clone(), 1);
        }
        black_box(map)
    });
}

#[divan::bench(args = [16, 64, 256, 512])]
fn insert_array_indexes(bencher: Bencher, entries: usize) {
    bencher.bench_local(|| {
        let mut arr = Value::new(ValueType::Array);
        for _ in 0..entries {
            arr.append(Value::from(1i64));
        }
        black_box(arr)
    });
}

#[divan::bench]
fn insert_static_keys(bencher: Bencher) {
    const NAMES: [StaticStr; 4] = [
        StaticStr("alpha"),
        StaticStr("beta"),
        StaticStr("gamma"),
        StaticStr("delta"),
    ];
    bencher.bench_local(|| {
        let mut obj = Value::new(ValueType::Object);
        for name in NAMES {
            obj[name] = Value::from(1i64);
        }
        black_box(obj)
    });
}

// --- Lookup benchmarks -----------------------------------------------------

#[divan::bench(args = [16, 64, 256, 512])]
fn lookup_object_members(bencher: Bencher, entries: usize) {
    let keys = keys(entries);
    let mut obj = Value::new(ValueType::Object);
    for key in &keys {
        obj[key.as_str()] = Value::from(1i64);
    }
    bencher.bench_local(|| {
        let mut hits = 0usize;
        for key in &keys {
            if obj.get_member(black_box(key)).is_some() {
                hits += 1;
            }
        }
        black_box(hits)
    });
}

#[divan::bench(args = [16, 64, 256, 512])]
fn iterate_members_in_order(bencher: Bencher, entries: usize) {
    let keys = keys(entries);
    let mut obj = Value::new(ValueType::Object);
    for key in &keys {
        obj[key.as_str()] = Value::from(1i64);
    }
    bencher.bench_local(|| {
        let mut total = 0i64;
        for (_, v) in obj.members() {
            total += v.to_i64().unwrap_or(0);
        }
        black_box(total)
    });
}
