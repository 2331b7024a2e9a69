//! `floorf` benchmarks.
//!
//! Run: `cargo bench -p mathfn -- floorf`
//!
//! This benchmarks:
//! - Main dispatch path (cached binding + indirect call)
//! - Each kernel the host can run, called through its table entry

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mathfn::floorf::{kernel_test::run_all_floorf_kernels, select_for_caps};
use platform::{Caps, caps::power};

/// Inputs spanning fractional, integral, negative and large values.
fn inputs() -> Vec<f32> {
  (0..1024).map(|i| (i as f32 - 512.0) * 0.37 + if i % 7 == 0 { 1.0e7 } else { 0.0 }).collect()
}

fn bench_dispatch(c: &mut Criterion) {
  let mut group = c.benchmark_group("floorf/dispatch");
  eprintln!("floorf backend: {}", mathfn::floorf::selected_backend());
  let data = inputs();
  group.throughput(Throughput::Elements(data.len() as u64));

  group.bench_function("floorf", |b| {
    b.iter(|| data.iter().fold(0.0f32, |acc, &x| acc + mathfn::floorf(black_box(x))));
  });
  group.bench_function("floorf32", |b| {
    b.iter(|| data.iter().fold(0.0f32, |acc, &x| acc + mathfn::floorf32(black_box(x))));
  });
  group.finish();
}

fn bench_kernels(c: &mut Criterion) {
  let mut group = c.benchmark_group("floorf/kernels");
  let data = inputs();
  group.throughput(Throughput::Elements(data.len() as u64));

  let mut seen = Vec::new();
  for caps in [platform::caps(), power::POWER5_PLUS, Caps::NONE] {
    let selected = select_for_caps(caps);
    if seen.contains(&selected.name) {
      continue;
    }
    seen.push(selected.name);
    group.bench_with_input(BenchmarkId::from_parameter(selected.name), &data, |b, data| {
      b.iter(|| data.iter().fold(0.0f32, |acc, &x| acc + (selected.func)(black_box(x))));
    });
  }

  group.finish();
}

fn bench_std_reference(c: &mut Criterion) {
  let data = inputs();
  let names: Vec<_> = run_all_floorf_kernels(1.5).iter().map(|r| r.name).collect();
  eprintln!("available kernels: {names:?}");
  c.bench_function("floorf/std", |b| {
    b.iter(|| data.iter().fold(0.0f32, |acc, &x| acc + black_box(x).floor()));
  });
}

criterion_group!(benches, bench_dispatch, bench_kernels, bench_std_reference);
criterion_main!(benches);
