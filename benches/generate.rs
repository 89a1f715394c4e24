use liquidglass::generate;

use criterion::{Criterion, criterion_group, criterion_main};

fn generate_map(c: &mut Criterion) {
    c.bench_function("generate_1920x1080", |b| {
        b.iter(|| generate(1920, 1080, 48.0, 24.0));
    });

    c.bench_function("generate_320x120", |b| {
        b.iter(|| generate(320, 120, 20.0, 10.0));
    });
}

criterion_group!(benches, generate_map);
criterion_main!(benches);
