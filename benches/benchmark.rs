use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itertools::{izip, Itertools};
use safecalc::{evaluate, Evaluator};

const BENCH_EXPRESSIONS_NAMES: [&str; 3] = ["flat", "nested", "rejected"];
const BENCH_EXPRESSIONS_STRS: [&str; 3] = [
    "2 * 6 - 4 - 3 / 2 + 3 * 4 * 7 - 32 * 3 + 43 * 4",
    "-(1 - 1 / (3 * 5)) + 5 ^ (2 / (0.5 * 4)) // 3 % 7",
    "2 * 6 - 4 - 3 / 2 + 3 * 4 * x",
];

fn safecalc_exprs(c: &mut Criterion) {
    let evaluator = Evaluator::default();
    for (name, text) in izip!(BENCH_EXPRESSIONS_NAMES, BENCH_EXPRESSIONS_STRS) {
        c.bench_function(&format!("safecalc_{}", name), |b| {
            b.iter(|| {
                for _ in 0..100 {
                    let _ = evaluator.evaluate(black_box(text));
                }
            })
        });
    }
}

fn safecalc_budget_exhaustion(c: &mut Criterion) {
    let deep = (0..10_000).map(|_| "-(").chain(["1"]).join("");
    c.bench_function("safecalc_budget_exhaustion", |b| {
        b.iter(|| {
            let _ = evaluate(black_box(&deep));
        })
    });
}

criterion_group!(benches, safecalc_exprs, safecalc_budget_exhaustion);
criterion_main!(benches);
