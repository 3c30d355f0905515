use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rebase_ledger::{AccrualLedger, MemoryLedger};
use rebase_types::{Address, Timestamp};

fn make_ledger_with_holders(n: usize) -> AccrualLedger<MemoryLedger> {
    let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), 50_000_000_000);
    for i in 0..n {
        let holder = Address::new(format!("holder-{i}"));
        ledger
            .fund(&holder, 1_000_000, ledger.global_rate(), Timestamp::new(0))
            .unwrap();
    }
    ledger
}

fn bench_effective_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("effective_balance");

    for holder_count in [1, 100, 10_000] {
        let ledger = make_ledger_with_holders(holder_count);
        let target = Address::new(format!("holder-{}", holder_count / 2));
        let now = Timestamp::new(86_400);

        group.bench_with_input(
            BenchmarkId::new("effective_balance_of", holder_count),
            &holder_count,
            |b, _| {
                b.iter(|| {
                    black_box(
                        ledger
                            .effective_balance_of(black_box(&target), black_box(now))
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle");
    let mut ledger = make_ledger_with_holders(1_000);
    let target = Address::new("holder-500");

    let mut t = 1u64;
    group.bench_function("settle_single_holder", |b| {
        b.iter(|| {
            t += 1;
            black_box(ledger.settle(black_box(&target), Timestamp::new(t)).unwrap())
        });
    });

    group.finish();
}

fn bench_move_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_value");
    let mut ledger = make_ledger_with_holders(1_000);
    let a = Address::new("holder-1");
    let b_addr = Address::new("holder-2");

    let mut t = 1u64;
    group.bench_function("move_value_1_unit", |b| {
        b.iter(|| {
            t += 1;
            black_box(
                ledger
                    .move_value(black_box(&a), black_box(&b_addr), 1, Timestamp::new(t))
                    .unwrap(),
            )
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_effective_balance,
    bench_settle,
    bench_move_value
);
criterion_main!(benches);
