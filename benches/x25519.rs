use cryptal25519::keys::x25519::{BASEPOINT, exchange, public_key};
use cryptal25519::x25519;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SECRET: [u8; 32] = [0x42; 32];

pub fn bench_public_key(c: &mut Criterion) {
    c.bench_function("x25519 public key", |b| b.iter(|| public_key(black_box(&SECRET))));
}

pub fn bench_ladder(c: &mut Criterion) {
    let peer = public_key(&[0x17; 32]);

    c.bench_function("x25519 ladder", |b| {
        b.iter(|| exchange(black_box(&SECRET), black_box(&peer)))
    });
    c.bench_function("x25519 ladder (big-endian)", |b| {
        b.iter(|| x25519(black_box(&SECRET), black_box(&BASEPOINT)))
    });
}

criterion_group!(benches, bench_public_key, bench_ladder);
criterion_main!(benches);
