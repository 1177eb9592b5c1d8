use criterion::{Criterion, black_box, criterion_group, criterion_main};
use named_regexp_core::transform;

fn bench_simple_named(c: &mut Criterion) {
    let pattern = r"(?<hours>\d\d?):(?<minutes>\d\d?):(?<seconds>\d\d?)";

    c.bench_function("transform_simple", |b| {
        b.iter(|| black_box(transform(black_box(pattern))))
    });
}

fn bench_deep_nesting(c: &mut Criterion) {
    let pattern = r"(((((((?<a>\d\d\d)))-((?<b>\d\d))))-((((?<c>\d))))))";

    c.bench_function("transform_deep_nesting", |b| {
        b.iter(|| black_box(transform(black_box(pattern))))
    });
}

fn bench_classes_and_escapes(c: &mut Criterion) {
    let pattern = r"^((?<schema>http[s]?|ftp):\/)?\/?(?<domain>[^:\/\s]+)(?<path>(\/\w+)*\/)(?<file>[\w\-\.]+[^#?\s]+)(?<query>.*)?$";

    c.bench_function("transform_url", |b| {
        b.iter(|| black_box(transform(black_box(pattern))))
    });
}

fn bench_long_pattern(c: &mut Criterion) {
    let pattern: String = (0..200).map(|i| format!(r"(?<g{i}>\w+)\s")).collect();

    c.bench_function("transform_200_groups", |b| {
        b.iter(|| black_box(transform(black_box(&pattern))))
    });
}

criterion_group!(
    benches,
    bench_simple_named,
    bench_deep_nesting,
    bench_classes_and_escapes,
    bench_long_pattern,
);

criterion_main!(benches);
