//! Diff and parse throughput.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use planscope::diff::{compute_diff, context_diff, DEFAULT_CONTEXT_LINES};
use planscope::parse_plan;
use std::hint::black_box;

/// A script of `n` lines with every tenth line edited in the new version.
fn script_pair(n: usize) -> (Vec<String>, Vec<String>) {
    let old: Vec<String> = (0..n).map(|i| format!("echo step {i}")).collect();
    let new = old
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i % 10 == 0 {
                format!("{line} --verbose")
            } else {
                line.clone()
            }
        })
        .collect();
    (old, new)
}

/// A modern-format plan with `n` resources.
fn generate_plan(n: usize) -> String {
    let mut text = String::from("Terraform will perform the following actions:\n\n");
    for i in 0..n {
        let (phrase, marker) = match i % 3 {
            0 => ("will be created", "+"),
            1 => ("will be updated in-place", "~"),
            _ => ("will be destroyed", "-"),
        };
        text.push_str(&format!(
            "  # module.app.aws_instance.node_{i} {phrase}\n  {marker} resource \"aws_instance\" \"node_{i}\" {{\n      {marker} ami           = \"ami-{i:08x}\"\n      {marker} instance_type = \"t3.small\"\n      {marker} tags          = {{\n          {marker} \"Name\" = \"node-{i}\"\n        }}\n    }}\n\n"
        ));
    }
    text.push_str("Plan: 1 to add, 1 to change, 1 to destroy.\n");
    text
}

fn bench_compute_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_diff");
    for size in [50, 200, 400, 2_000] {
        let (old, new) = script_pair(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compute_diff(black_box(&old), black_box(&new)));
        });
    }
    group.finish();
}

fn bench_context_diff(c: &mut Criterion) {
    let (old, new) = script_pair(400);
    let diff = compute_diff(&old, &new);
    c.bench_function("context_diff/400", |b| {
        b.iter(|| context_diff(black_box(&diff), DEFAULT_CONTEXT_LINES));
    });
}

fn bench_parse_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_plan");
    for size in [10, 100, 1_000] {
        let text = generate_plan(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_plan(black_box(text)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compute_diff,
    bench_context_diff,
    bench_parse_plan
);
criterion_main!(benches);
