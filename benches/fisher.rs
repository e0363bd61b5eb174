use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use thompson_bandit::{BigBinomial, ContingencyTable, ExactBinomial};

fn bench_fisher(c: &mut Criterion) {
    let mut group = c.benchmark_group("fisher_exact");
    for &n in &[100u64, 1_000, 10_000] {
        // Two arms with a 2-point gap in success rate.
        let table = ContingencyTable::new(n / 2 + n / 50, n / 2 - n / 50, n / 2 - n / 50, n / 2 + n / 50);
        group.bench_with_input(BenchmarkId::new("trials_per_arm", n), &table, |b, t| {
            b.iter(|| black_box(t.fisher_exact().unwrap()))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("binomial");
    for &n in &[1_000u64, 10_000, 40_000] {
        group.bench_with_input(BenchmarkId::new("central", n), &n, |b, &n| {
            b.iter(|| black_box(BigBinomial.binomial(n, n / 2).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fisher);
criterion_main!(benches);
