use criterion::{criterion_group, criterion_main, Criterion};
use resumerag_core::build_index;

fn corpus() -> Vec<String> {
    let words = ["rust", "tokio", "kafka", "react", "postgres", "terraform", "python", "spark", "kubernetes", "grpc"];
    (0..200)
        .map(|i| (0..300).map(|j| words[(i * 7 + j * 3) % words.len()]).collect::<Vec<_>>().join(" "))
        .collect()
}

fn bench_build_index(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("build_index_200_docs", |b| b.iter(|| build_index(&docs)));
}

criterion_group!(benches, bench_build_index);
criterion_main!(benches);
