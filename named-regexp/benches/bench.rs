use criterion::{Criterion, black_box, criterion_group, criterion_main};
use named_regexp::{RegExp, compile};

fn bench_compile(c: &mut Criterion) {
    let pattern = r"(?<hours>\d\d?):(?<minutes>\d\d?):(?<seconds>\d\d?)";

    c.bench_function("compile_named", |b| {
        b.iter(|| black_box(compile(black_box(pattern), "")))
    });
}

fn bench_exec_named(c: &mut Criterion) {
    let mut re = compile(r"(?<hours>\d\d?):(?<minutes>\d\d?):(?<seconds>\d\d?)", "").unwrap();
    let input = "the meeting starts at 10:30:00 sharp";

    c.bench_function("exec_named", |b| {
        b.iter(|| black_box(re.exec(black_box(input)).unwrap()))
    });
}

fn bench_exec_plain(c: &mut Criterion) {
    let mut re = RegExp::new(r"(\d\d?):(\d\d?):(\d\d?)", "").unwrap();
    let input = "the meeting starts at 10:30:00 sharp";

    c.bench_function("exec_plain", |b| {
        b.iter(|| black_box(re.exec(black_box(input)).unwrap()))
    });
}

fn bench_matches(c: &mut Criterion) {
    let re = compile(r"(?<key>\w+)=(?<value>\w+)", "").unwrap();
    let input = "a=1 b=2 c=3 d=4 e=5 f=6 g=7 h=8 i=9 j=10";

    c.bench_function("matches_all", |b| {
        b.iter(|| black_box(re.matches(black_box(input)).count()))
    });
}

fn bench_replace(c: &mut Criterion) {
    let mut re = compile(r"(?<first>\w+) (?<last>\w+)", "g").unwrap();
    let input = "Ada Lovelace, Alan Turing, Grace Hopper";

    c.bench_function("replace_global", |b| {
        b.iter(|| black_box(re.replace(black_box(input), "$<last> $<first>").unwrap()))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_exec_named,
    bench_exec_plain,
    bench_matches,
    bench_replace,
);

criterion_main!(benches);
