use criterion::{black_box, criterion_group, criterion_main, Criterion};

use octo_util::diagnostic::Handler;
use octo_util::symbol::SharedInterner;
use octo_util::SourceMap;

fn generate_source(n: usize) -> String {
    let mut src = String::new();
    for i in 0..n {
        src.push_str(&format!(
            "func f{i}(a: i32, b: i32) -> i32 {{ return a + b * {i}; }}\n"
        ));
    }
    src
}

fn bench_parse_500_functions(c: &mut Criterion) {
    let source_text = generate_source(500);
    let source = SourceMap::from_source("bench.oc", source_text);
    let interner = SharedInterner::new();
    let lex_handler = Handler::new();
    let tokens = octo_lex::tokenize(&source, &interner, &lex_handler);

    c.bench_function("parse_500_functions", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let ast = octo_par::parse(black_box(tokens.clone()), &handler, &interner);
            black_box(ast)
        })
    });
}

criterion_group!(benches, bench_parse_500_functions);
criterion_main!(benches);
