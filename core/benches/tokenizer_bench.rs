use criterion::{criterion_group, criterion_main, Criterion};
use search_core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = include_str!("corpus.txt");
    c.bench_function("tokenize_corpus", |b| b.iter(|| tokenize(text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
