use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::SliceRandom;
use rand::SeedableRng;

use jitter_core::JitterBuffer;

const FRAME_SIZE: usize = 160;

fn bench_in_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_get_in_order");
    for capacity in [10usize, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let buffer = JitterBuffer::new(capacity, FRAME_SIZE).unwrap();
            let frame = [0u8; FRAME_SIZE];
            let mut out = [0u8; FRAME_SIZE];
            let mut seq = 0u32;
            b.iter(|| {
                buffer.put(black_box(&frame), seq);
                seq = seq.wrapping_add(1);
                if buffer.is_full() {
                    buffer.get(&mut out);
                }
            });
        });
    }
    group.finish();
}

fn bench_reordered(c: &mut Criterion) {
    // Shuffle within small windows, the way network reordering usually looks
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut seqs: Vec<u32> = (0..4096).collect();
    for window in seqs.chunks_mut(4) {
        window.shuffle(&mut rng);
    }

    c.bench_function("put_get_reordered_window_4", |b| {
        let frame = [0u8; FRAME_SIZE];
        let mut out = [0u8; FRAME_SIZE];
        b.iter(|| {
            let buffer = JitterBuffer::new(50, FRAME_SIZE).unwrap();
            for &seq in &seqs {
                buffer.put(&frame, seq);
                if buffer.count() > 8 {
                    buffer.get(&mut out);
                }
            }
            black_box(buffer.stats())
        });
    });
}

criterion_group!(benches, bench_in_order, bench_reordered);
criterion_main!(benches);
