//! Scalar-multiplication throughput on the standard 256-bit curve.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stb_ec::{Curve, CurveParams, EcPolicy};
use stb_types::Word;

fn h2b(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn curve() -> Curve {
    let p = h2b("43ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
    let a = h2b("40ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
    let b = h2b("f1039cd66b7d2eb253928b976950f54cbefbd8e4ab3ac1d2eda8f315156cce77");
    let q = h2b("07663d2699bf5a7efc4dfb0dd68e5cd9ffffffffffffffffffffffffffffffff");
    let yg = h2b("936a510418cf291e52f608c4663991785d83d651a3c9e45c9fd616fb3cfcf76b");
    let params = CurveParams {
        p: &p,
        a: &a,
        b: &b,
        yg: &yg,
        q: &q,
        cofactor: 1,
    };
    Curve::new(&params, EcPolicy::default()).unwrap()
}

fn scalar_mul(c: &mut Criterion) {
    let curve = curve();
    let mut stack = curve.alloc_stack();
    let d: Vec<Word> = vec![0x0123_4567_89ab_cdef as Word; curve.words()];
    c.bench_function("mul_fast/bign256", |b| {
        b.iter(|| black_box(curve.mul_fast(curve.base(), black_box(&d), &mut stack)))
    });
    c.bench_function("mul_safe/bign256", |b| {
        b.iter(|| black_box(curve.mul_safe(curve.base(), black_box(&d), &mut stack)))
    });
}

criterion_group!(benches, scalar_mul);
criterion_main!(benches);
