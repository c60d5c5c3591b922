//! Ring axioms for every reduction strategy, on randomised residues.

use proptest::prelude::*;
use stb_qr::{Reducer, Ring};
use stb_types::Word;

/// 2^127 − 1: 16 octets, short enough for the plain strategy.
fn plain_modulus() -> Vec<u8> {
    let mut m = vec![0xff; 16];
    m[15] = 0x7f;
    m
}

/// 2^256 − 189, the standard prime: Crandall shape.
fn crandall_modulus() -> Vec<u8> {
    let mut m = vec![0xff; 32];
    m[0] = 0x43;
    m
}

/// The standard group order: odd, not Crandall — Montgomery.
const Q256: [u8; 32] = [
    0x07, 0x66, 0x3d, 0x26, 0x99, 0xbf, 0x5a, 0x7e, 0xfc, 0x4d, 0xfb, 0x0d, 0xd6, 0x8e, 0x5c,
    0xd9, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff,
];

/// Q256 − 1: long, even, not Crandall — Barrett.
fn barrett_modulus() -> Vec<u8> {
    let mut m = Q256.to_vec();
    m[0] -= 1;
    m
}

fn rings() -> Vec<Ring> {
    vec![
        Ring::new(&plain_modulus()).unwrap(),
        Ring::new(&crandall_modulus()).unwrap(),
        Ring::new(&Q256).unwrap(),
        Ring::new(&barrett_modulus()).unwrap(),
    ]
}

/// Reduce arbitrary words into an element of `ring`.
fn elem_from_seed(ring: &Ring, seed: &[Word]) -> Vec<Word> {
    let n = ring.words();
    let mut wide = vec![0 as Word; 2 * n];
    for (i, w) in wide.iter_mut().enumerate() {
        *w = seed[i % seed.len()].wrapping_mul(0x9e37_79b9_7f4a_7c15 ^ i as Word);
    }
    let mut r = vec![0 as Word; n];
    let mut stack = vec![0 as Word; stb_zz::rem_deep(2 * n, n)];
    stb_zz::rem(&mut r, &wide, ring.modulus(), &mut stack);
    let mut out = ring.alloc_elem();
    let mut stack = ring.alloc_stack();
    ring.encode(&mut out, &r, &mut stack);
    out
}

#[test]
fn selection_matches_the_documented_rules() {
    let rs = rings();
    assert!(matches!(rs[0].reducer(), Reducer::Plain));
    assert!(matches!(rs[1].reducer(), Reducer::Crandall { c: 189 }));
    assert!(matches!(rs[2].reducer(), Reducer::Montgomery { .. }));
    assert!(matches!(rs[3].reducer(), Reducer::Barrett { .. }));
}

#[test]
fn montgomery_unity_is_the_radix_residue() {
    // R mod (2^256 − 189) = 189
    let ring = Ring::new_montgomery(&crandall_modulus()).unwrap();
    assert_eq!(ring.unity()[0], 189);
    assert!(ring.unity()[1..].iter().all(|&w| w == 0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn additive_axioms(seed in proptest::collection::vec(any::<u64>(), 4)) {
        for ring in rings() {
            let n = ring.words();
            let a = elem_from_seed(&ring, &seed);
            let zero = ring.alloc_elem();
            let mut c = vec![0 as Word; n];
            ring.add(&mut c, &a, &zero);
            prop_assert_eq!(&c, &a);
            let mut na = vec![0 as Word; n];
            ring.neg(&mut na, &a);
            ring.add(&mut c, &a, &na);
            prop_assert!(ring.is_zero_elem(&c));
        }
    }

    #[test]
    fn addition_commutes_and_associates(
        s1 in proptest::collection::vec(any::<u64>(), 4),
        s2 in proptest::collection::vec(any::<u64>(), 4),
        s3 in proptest::collection::vec(any::<u64>(), 4),
    ) {
        for ring in rings() {
            let n = ring.words();
            let (a, b, c) = (
                elem_from_seed(&ring, &s1),
                elem_from_seed(&ring, &s2),
                elem_from_seed(&ring, &s3),
            );
            let mut ab = vec![0 as Word; n];
            let mut ba = vec![0 as Word; n];
            ring.add(&mut ab, &a, &b);
            ring.add(&mut ba, &b, &a);
            prop_assert_eq!(&ab, &ba);
            let mut l = vec![0 as Word; n];
            let mut r = vec![0 as Word; n];
            ring.add(&mut l, &ab, &c);
            ring.add(&mut r, &b, &c);
            let mut r2 = vec![0 as Word; n];
            ring.add(&mut r2, &a, &r);
            prop_assert_eq!(&l, &r2);
        }
    }

    #[test]
    fn multiplicative_axioms(
        s1 in proptest::collection::vec(any::<u64>(), 4),
        s2 in proptest::collection::vec(any::<u64>(), 4),
        s3 in proptest::collection::vec(any::<u64>(), 4),
    ) {
        for ring in rings() {
            let n = ring.words();
            let mut stack = ring.alloc_stack();
            let (a, b, c) = (
                elem_from_seed(&ring, &s1),
                elem_from_seed(&ring, &s2),
                elem_from_seed(&ring, &s3),
            );
            // unity
            let mut t = vec![0 as Word; n];
            ring.mul(&mut t, &a, ring.unity(), &mut stack);
            prop_assert_eq!(&t, &a);
            // commutativity
            let mut ab = vec![0 as Word; n];
            let mut ba = vec![0 as Word; n];
            ring.mul(&mut ab, &a, &b, &mut stack);
            ring.mul(&mut ba, &b, &a, &mut stack);
            prop_assert_eq!(&ab, &ba);
            // squaring agrees with multiplication
            let mut aa = vec![0 as Word; n];
            let mut sq = vec![0 as Word; n];
            ring.mul(&mut aa, &a, &a, &mut stack);
            ring.sqr(&mut sq, &a, &mut stack);
            prop_assert_eq!(&aa, &sq);
            // distributivity: a·(b + c) == a·b + a·c
            let mut bc = vec![0 as Word; n];
            ring.add(&mut bc, &b, &c);
            let mut l = vec![0 as Word; n];
            ring.mul(&mut l, &a, &bc, &mut stack);
            let mut ac = vec![0 as Word; n];
            ring.mul(&mut ac, &a, &c, &mut stack);
            let mut r = vec![0 as Word; n];
            ring.add(&mut r, &ab, &ac);
            prop_assert_eq!(&l, &r);
        }
    }

    #[test]
    fn inversion_and_division(seed in proptest::collection::vec(any::<u64>(), 4)) {
        for ring in rings() {
            let n = ring.words();
            let mut stack = ring.alloc_stack();
            let a = elem_from_seed(&ring, &seed);
            if ring.is_zero_elem(&a) {
                continue;
            }
            let mut inv = vec![0 as Word; n];
            if ring.inv(&mut inv, &a, &mut stack).is_err() {
                // a shares a factor with a composite modulus; legal
                continue;
            }
            let mut one = vec![0 as Word; n];
            ring.mul(&mut one, &a, &inv, &mut stack);
            prop_assert!(ring.is_unity(&one));
            // div(x, a) == x·inv(a)
            let x = elem_from_seed(&ring, &[seed[0] ^ 0x5a5a, seed[1], seed[2], seed[3]]);
            let mut d = vec![0 as Word; n];
            ring.div(&mut d, &x, &a, &mut stack).unwrap();
            let mut m = vec![0 as Word; n];
            ring.mul(&mut m, &x, &inv, &mut stack);
            prop_assert_eq!(&d, &m);
        }
    }

    #[test]
    fn octet_round_trip(seed in proptest::collection::vec(any::<u64>(), 4)) {
        for ring in rings() {
            let mut stack = ring.alloc_stack();
            let a = elem_from_seed(&ring, &seed);
            let mut oct = vec![0u8; ring.octets()];
            ring.to_octets(&mut oct, &a, &mut stack);
            let mut back = ring.alloc_elem();
            ring.from_octets(&mut back, &oct, &mut stack).unwrap();
            prop_assert_eq!(&back, &a);
        }
    }

    #[test]
    fn power_against_repeated_multiplication(seed in proptest::collection::vec(any::<u64>(), 4)) {
        for ring in rings() {
            let n = ring.words();
            let mut stack = ring.alloc_stack();
            let a = elem_from_seed(&ring, &seed);
            let e = [13 as Word];
            let mut p = vec![0 as Word; n];
            ring.power(&mut p, &a, &e, &mut stack);
            let mut acc = ring.alloc_elem();
            acc.copy_from_slice(ring.unity());
            for _ in 0..13 {
                let mut t = vec![0 as Word; n];
                ring.mul(&mut t, &acc, &a, &mut stack);
                acc = t;
            }
            prop_assert_eq!(&p, &acc);
        }
    }
}

#[test]
fn montgomery_octet_identity() {
    // to_octets(from_octets(x)) must be bitwise x for in-range x
    let ring = Ring::new(&Q256).unwrap();
    assert!(matches!(ring.reducer(), Reducer::Montgomery { .. }));
    let mut stack = ring.alloc_stack();
    let x = [3u8; 32];
    let mut e = ring.alloc_elem();
    ring.from_octets(&mut e, &x, &mut stack).unwrap();
    // internal form differs from the residue
    let mut plain = vec![0 as Word; 4];
    stb_types::words_from_octets(&mut plain, &x);
    assert_ne!(&e[..], &plain[..]);
    let mut back = [0u8; 32];
    ring.to_octets(&mut back, &e, &mut stack);
    assert_eq!(back, x);
}

#[test]
fn bad_octets_are_rejected() {
    let ring = Ring::new(&Q256).unwrap();
    let mut stack = ring.alloc_stack();
    let mut e = ring.alloc_elem();
    assert!(ring.from_octets(&mut e, &[0u8; 31], &mut stack).is_err());
    // the modulus itself is out of range
    assert!(ring.from_octets(&mut e, &Q256, &mut stack).is_err());
}
