use cryptal25519::curve::{EdwardsPoint, Scalar};
use cryptal25519::{publickey, sign, sign_open};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SEED: [u8; 32] = [0x42; 32];

pub fn bench_publickey(c: &mut Criterion) {
    c.bench_function("ed25519 publickey", |b| b.iter(|| publickey(black_box(&SEED))));
}

pub fn bench_sign(c: &mut Criterion) {
    let public = publickey(&SEED);
    let message = [0u8; 64];

    c.bench_function("ed25519 sign 64 bytes", |b| {
        b.iter(|| sign(black_box(&message), black_box(&SEED), &public))
    });
}

pub fn bench_verify(c: &mut Criterion) {
    let public = publickey(&SEED);
    let message = [0u8; 64];
    let signature = sign(&message, &SEED, &public);

    c.bench_function("ed25519 verify 64 bytes", |b| {
        b.iter(|| sign_open(black_box(&message), black_box(&signature), &public))
    });
}

pub fn bench_scalar_mul(c: &mut Criterion) {
    let k = Scalar::from_bytes_mod_order([0x37; 32]);
    let point = EdwardsPoint::mul_base(&k);

    c.bench_function("edwards fixed-base mul", |b| {
        b.iter(|| EdwardsPoint::mul_base(black_box(&k)))
    });
    c.bench_function("edwards variable-base mul", |b| {
        b.iter(|| black_box(&point) * black_box(&k))
    });
}

criterion_group!(benches, bench_publickey, bench_sign, bench_verify, bench_scalar_mul);
criterion_main!(benches);
