use criterion::{black_box, criterion_group, criterion_main, Criterion};
use octo_util::SourceMap;

fn bench_offset_to_line_col(c: &mut Criterion) {
    let source = "let x: i32 = 0;\n".repeat(2000);
    let map = SourceMap::from_source("bench.oc", source);
    c.bench_function("offset_to_line_col", |b| {
        b.iter(|| black_box(map.offset_to_line_col(black_box(15_000))))
    });
}

criterion_group!(benches, bench_offset_to_line_col);
criterion_main!(benches);
