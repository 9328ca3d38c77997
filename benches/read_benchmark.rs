use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use jsonstruct::JsonStruct;

const WIKIPEDIA_SAMPLE: &str = include_str!("../tests/data/wikipedia_sample.json");

fn parse_document(json: &str) -> JsonStruct {
    match JsonStruct::from_json_str(json) {
        Ok(values) => values,
        Err(e) => panic!("sample document failed to parse: {:#}", e),
    }
}

fn bench_just_a_read(c: &mut Criterion) {
    c.bench_function("just a read", |b| {
        b.iter(|| black_box(parse_document(black_box(WIKIPEDIA_SAMPLE))));
    });
}

fn bench_read_and_five_gets(c: &mut Criterion) {
    c.bench_function("read followed by five value gets", |b| {
        b.iter(|| {
            let values = parse_document(black_box(WIKIPEDIA_SAMPLE));
            black_box(values.string(".firstName"));
            black_box(values.string(".lastName"));
            black_box(values.int(".age"));
            black_box(values.string(".address.streetAddress"));
            black_box(values.string(".address.postalCode"));
        });
    });
}

fn bench_accessors(c: &mut Criterion) {
    let values = parse_document(WIKIPEDIA_SAMPLE);
    let mut group = c.benchmark_group("accessors");

    group.bench_function("nested get", |b| {
        b.iter(|| black_box(values.string(black_box(".address.postalCode"))));
    });

    group.bench_function("nested set", |b| {
        let mut target = values.deep_copy();
        b.iter(|| target.set_string(black_box(".address.geo.zone"), "east"));
    });

    group.bench_function("deep copy", |b| {
        b.iter(|| black_box(values.deep_copy()));
    });

    group.finish();
}

criterion_group!(benches, bench_just_a_read, bench_read_and_five_gets, bench_accessors);
criterion_main!(benches);
