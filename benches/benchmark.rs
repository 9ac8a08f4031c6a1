use std::sync::Arc;

use ccs_guard::config::{CheckerConfig, EvaluationMode};
use ccs_guard::{parse, GuardednessChecker, Process};
use criterion::{criterion_group, criterion_main, Criterion};

fn wide_term(branches: usize) -> String {
    let mut source = String::from("rec x. ");
    for _ in 0..branches {
        source.push_str("(a.x)|");
    }
    source.push_str("b.x");
    source
}

fn bench_parse(c: &mut Criterion) {
    let source = wide_term(256);
    c.bench_function("parse 256 branches", |b| b.iter(|| parse(&source)));
}

fn bench_check(c: &mut Criterion) {
    let process = Arc::new(Process::from(&parse(&wide_term(256)).unwrap()));
    let rt = tokio::runtime::Runtime::new().unwrap();

    for evaluation in [
        EvaluationMode::Concurrent,
        EvaluationMode::Inline,
        EvaluationMode::Sequential,
    ] {
        let checker = GuardednessChecker::new(CheckerConfig {
            evaluation,
            short_circuit: false,
        });
        c.bench_function(&format!("check 256 branches ({:?})", evaluation), |b| {
            b.iter(|| rt.block_on(checker.is_guarded(process.clone())))
        });
    }
}

criterion_group!(benches, bench_parse, bench_check);
criterion_main!(benches);
