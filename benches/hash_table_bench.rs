use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use plain_collections::{ChainingHashTable, ProbingHashTable};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("chaining_add_10k", |b| {
        b.iter_batched(
            ChainingHashTable::<String, u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.add(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("probing_add_10k", |b| {
        b.iter_batched(
            ProbingHashTable::<String, u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.add(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_hit(c: &mut Criterion) {
    let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();

    c.bench_function("chaining_lookup_hit", |b| {
        let mut t = ChainingHashTable::new();
        for (i, k) in keys.iter().cloned().enumerate() {
            t.add(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.lookup(k.as_str()));
        })
    });
    c.bench_function("probing_lookup_hit", |b| {
        let mut t = ProbingHashTable::new();
        for (i, k) in keys.iter().cloned().enumerate() {
            t.add(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.lookup(k.as_str()).copied());
        })
    });
}

fn bench_lookup_miss(c: &mut Criterion) {
    c.bench_function("probing_lookup_miss_after_churn", |b| {
        let mut t = ProbingHashTable::new();
        let keys: Vec<_> = lcg(11).take(10_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            t.add(k, i as u64);
        }
        // Leave tombstones behind on half the slots.
        for k in keys.iter().step_by(2) {
            t.remove(k.as_str());
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(t.lookup(k.as_str()).copied());
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add, bench_lookup_hit, bench_lookup_miss
}
criterion_main!(benches);
