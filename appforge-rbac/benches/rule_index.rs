//! Rule index build benchmarks.
//!
//! Index rebuilds run on every reindex interval, so build cost bounds
//! how aggressively the index can track usage shifts.

use appforge_rbac::{Access, Rule, RuleIndex};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn make_rule_set(n: usize, spread: u64) -> Vec<Rule> {
    (0..n)
        .map(|i| {
            let access = match i % 3 {
                0 => Access::Allow,
                1 => Access::Deny,
                _ => Access::Inherit,
            };

            Rule::new(
                (i as u64) % spread,
                format!("compose:record/{}/{}/{}", i % 7, i % 13, i),
                if i % 2 == 0 { "read" } else { "update" },
                access,
            )
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_index_build");

    for n in [100, 1_000, 10_000] {
        let rules = make_rule_set(n, 10);

        group.bench_with_input(BenchmarkId::from_parameter(n), &rules, |b, rules| {
            b.iter(|| RuleIndex::build(rules.iter().cloned()));
        });
    }

    group.finish();
}

fn bench_index_get(c: &mut Criterion) {
    let rules = make_rule_set(10_000, 10);
    let ix = RuleIndex::build(rules);

    c.bench_function("rule_index_get", |b| {
        b.iter(|| ix.get(3, "read", "compose:record/3/3/42"));
    });
}

criterion_group!(benches, bench_index_build, bench_index_get);
criterion_main!(benches);
