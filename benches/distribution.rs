use criterion::{Criterion, criterion_group, criterion_main};
use flop_odds::core::{Board, Hand, Value};
use flop_odds::holdem::{Distribution, OutsEngine, Range, RangeAggregator};

fn flop() -> Board {
    "Kc7cTs".parse().unwrap()
}

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

fn bench_outs_engine(c: &mut Criterion) {
    let flop = flop();
    let hero = hand("Kd3c");
    let villain = hand("AcQc");

    c.bench_function("outs_engine_new", |b| {
        b.iter(|| OutsEngine::new(std::hint::black_box(villain), &flop, hero).unwrap());
    });
}

fn bench_single_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribution");
    let flop = flop();
    let hero = hand("Kd3c");

    for villain in ["AcQc", "9h8h", "TdTh"] {
        let villain = hand(villain);
        group.bench_with_input(
            criterion::BenchmarkId::new("build", villain),
            &villain,
            |b, &villain| {
                b.iter(|| Distribution::new(villain, &flop, hero).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_range_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    group.sample_size(10);
    let flop = flop();
    let hero = hand("Kd3c");
    let aggregator = RangeAggregator::default();

    let pairs = Range::pocket_pairs(Value::Two);
    group.bench_function("pocket_pairs", |b| {
        b.iter(|| aggregator.aggregate(&pairs, &flop, hero).unwrap());
    });

    let all = Range::all();
    group.bench_function("all_combos", |b| {
        b.iter(|| aggregator.aggregate(&all, &flop, hero).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_outs_engine,
    bench_single_distribution,
    bench_range_aggregate
);
criterion_main!(benches);
