// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use limelight_geom::Matrix2D;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Plausible display-object transforms: translation, anisotropic
/// scale, rotation, a little skew, and a registration point.
fn gen_transforms(count: usize, seed: u64) -> Vec<[f64; 9]> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            [
                rng.next_f64() * 800.0,
                rng.next_f64() * 600.0,
                0.5 + rng.next_f64(),
                0.5 + rng.next_f64(),
                rng.next_f64() * 360.0,
                rng.next_f64() * 10.0,
                rng.next_f64() * 10.0,
                rng.next_f64() * 32.0,
                rng.next_f64() * 32.0,
            ]
        })
        .collect()
}

fn bench_append_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/append_transform");
    for depth in [8_usize, 64, 512] {
        let transforms = gen_transforms(depth, 0x5EED);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                let mut m = Matrix2D::IDENTITY;
                for t in &transforms {
                    m.append_transform(t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8]);
                }
                black_box(m)
            });
        });
    }
    group.finish();
}

fn bench_prepend_chain(c: &mut Criterion) {
    // The shape of concatenated-matrix computation: walk leaf-to-root
    // prepending each ancestor.
    let mut group = c.benchmark_group("matrix/prepend_chain");
    for depth in [8_usize, 64, 512] {
        let matrices: Vec<Matrix2D> = gen_transforms(depth, 0xABCD)
            .iter()
            .map(|t| {
                let mut m = Matrix2D::IDENTITY;
                m.append_transform(t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8]);
                m
            })
            .collect();
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                let mut m = Matrix2D::IDENTITY;
                for a in &matrices {
                    m.prepend_matrix(a);
                }
                black_box(m)
            });
        });
    }
    group.finish();
}

fn bench_invert(c: &mut Criterion) {
    let matrices: Vec<Matrix2D> = gen_transforms(256, 0xF00D)
        .iter()
        .map(|t| {
            let mut m = Matrix2D::IDENTITY;
            m.append_transform(t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8]);
            m
        })
        .collect();
    c.bench_function("matrix/invert_256", |b| {
        b.iter_batched(
            || matrices.clone(),
            |mut ms| {
                for m in &mut ms {
                    m.invert();
                }
                black_box(ms)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_transform_point(c: &mut Criterion) {
    let mut m = Matrix2D::IDENTITY;
    m.append_transform(100.0, 50.0, 1.5, 0.75, 30.0, 0.0, 0.0, 16.0, 16.0);
    c.bench_function("matrix/transform_point", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                let p = m.transform_point(f64::from(i), f64::from(i) * 0.5);
                acc += p.x + p.y;
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_append_transform,
    bench_prepend_chain,
    bench_invert,
    bench_transform_point
);
criterion_main!(benches);
