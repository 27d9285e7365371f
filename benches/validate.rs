use criterion::{Criterion, black_box, criterion_group, criterion_main};
use livr::Validator;
use serde_json::{Map, Value, json};

/// Schema with `n` fields, each carrying a presence rule and a length rule.
fn build_schema(n: usize) -> Value {
    let mut fields = Map::new();
    for i in 0..n {
        fields.insert(
            format!("f{i}"),
            json!(["required", {"length_between": [2, 32]}]),
        );
    }
    Value::Object(fields)
}

fn build_record(n: usize) -> Value {
    let mut record = Map::new();
    for i in 0..n {
        record.insert(format!("f{i}"), json!(format!("value-{i}")));
    }
    Value::Object(record)
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for &n in &[5, 20, 50] {
        let record = build_record(n);
        let mut validator = Validator::new(build_schema(n));
        validator.prepare().expect("schema compiles");

        group.bench_function(&format!("{n}_fields_ok"), |b| {
            b.iter(|| validator.validate(black_box(&record)).unwrap());
        });

        let mut validator = Validator::new(build_schema(n));
        validator.prepare().expect("schema compiles");
        let empty = json!({});

        group.bench_function(&format!("{n}_fields_all_failing"), |b| {
            b.iter(|| validator.validate(black_box(&empty)).unwrap());
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[5, 20, 50] {
        let schema = build_schema(n);
        group.bench_function(&format!("{n}_fields"), |b| {
            b.iter(|| {
                let mut validator = Validator::new(black_box(schema.clone()));
                validator.prepare().unwrap();
                validator
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_compilation);
criterion_main!(benches);
