//! Group-law and scalar-multiplication tests on the standard 256-bit
//! curve. Fixed expectations were computed with an independent
//! implementation of the curve arithmetic.

use rand::{rngs::StdRng, Rng, SeedableRng};
use stb_ec::{swu_map, AffineOrInf, Curve, CurveParams, EcPolicy, MulPolicy};
use stb_types::Word;

fn h2b(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

const P_LE: &str = "43ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const A_LE: &str = "40ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const B_LE: &str = "f1039cd66b7d2eb253928b976950f54cbefbd8e4ab3ac1d2eda8f315156cce77";
const Q_LE: &str = "07663d2699bf5a7efc4dfb0dd68e5cd9ffffffffffffffffffffffffffffffff";
const YG_LE: &str = "936a510418cf291e52f608c4663991785d83d651a3c9e45c9fd616fb3cfcf76b";

const G3X: &str = "4e82894985109dcc4b231c2b0c0612e0f5922e66f02c2778fbeff4cdd58ec537";
const G3Y: &str = "843e28327b17eff0e37a1e7a7569c10227315fd312e16041b985cbdab3c99bfd";

const K1_LE: &str = "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";
const K1PX: &str = "ee325306f74bc7c3e415a2dd6bc0675a965475640677af6a642e294855189c0b";
const K1PY: &str = "f20bab9a206ada1d186fc85c99ee0fe34e7f4cb7918dd7933d7aa593712f92da";
const K2_LE: &str = "1111111111111111111111111111111111111111111111111111111111111111";
const K2PX: &str = "680f0fa11a3b9531a3a003b0969e60badb916f03c72b4474feffdf00673d7f38";
const K2PY: &str = "a9da21526a185dd8dc74319cc12c643e5a1898de0f19f349e6b7d4a29c1f6413";
const K3_LE: &str = "2222222222222222222222222222222222222222222222222222222222222222";
const SUMX: &str = "e21582bf1322cd66b9feca0dbe4c33566e3d3b4b677ab41efaa2aec026b09849";
const SUMY: &str = "9b9dc86a176ba1bd6de340c658bc9a960a2ad910c189222b71f7bc2e8799a7d7";

fn curve() -> Curve {
    let (p, a, b, q, yg) = (h2b(P_LE), h2b(A_LE), h2b(B_LE), h2b(Q_LE), h2b(YG_LE));
    let params = CurveParams {
        p: &p,
        a: &a,
        b: &b,
        yg: &yg,
        q: &q,
        cofactor: 1,
    };
    Curve::new(&params, EcPolicy::default()).expect("the standard curve validates")
}

fn scalar(curve: &Curve, le_hex: &str) -> Vec<Word> {
    let oct = h2b(le_hex);
    let mut d = vec![0 as Word; curve.words()];
    stb_types::words_from_octets(&mut d, &oct);
    d
}

fn point_octets(x_le: &str, y_le: &str) -> Vec<u8> {
    let mut v = h2b(x_le);
    v.extend_from_slice(&h2b(y_le));
    v
}

#[test]
fn bootstrap_validates_and_rejects_tampering() {
    curve();
    let (p, a, mut b, q, yg) = (h2b(P_LE), h2b(A_LE), h2b(B_LE), h2b(Q_LE), h2b(YG_LE));
    b[7] ^= 0x40;
    let params = CurveParams {
        p: &p,
        a: &a,
        b: &b,
        yg: &yg,
        q: &q,
        cofactor: 1,
    };
    assert!(Curve::new(&params, EcPolicy::default()).is_err());
}

#[test]
fn doubling_and_addition_reach_three_g() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let g = c.base().clone();
    let expect = c
        .decode_point(&point_octets(G3X, G3Y), &mut stack)
        .unwrap();

    // 2G + G
    let g2 = match c.dbl_affine(&g, &mut stack) {
        AffineOrInf::Point(p) => p,
        AffineOrInf::Infinity => panic!("2G must be finite"),
    };
    let g3 = c.add_affine(&g2, &g, &mut stack);
    assert_eq!(g3.point().unwrap(), &expect);

    // 3·G by the fast ladder
    let d = [3 as Word, 0, 0, 0];
    let g3m = c.mul_fast(&g, &d, &mut stack);
    assert_eq!(g3m.point().unwrap(), &expect);

    // and by the safe ladder
    let g3s = c.mul_safe(&g, &d, &mut stack);
    assert_eq!(g3s.point().unwrap(), &expect);
}

#[test]
fn fixed_scalar_multiples() {
    let c = curve();
    let mut stack = c.alloc_stack();
    for (d_hex, x_hex, y_hex) in [(K1_LE, K1PX, K1PY), (K2_LE, K2PX, K2PY)] {
        let d = scalar(&c, d_hex);
        let expect = c.decode_point(&point_octets(x_hex, y_hex), &mut stack).unwrap();
        let fast = c.mul_fast(c.base(), &d, &mut stack);
        assert_eq!(fast.point().unwrap(), &expect);
        let safe = c.mul_safe(c.base(), &d, &mut stack);
        assert_eq!(safe.point().unwrap(), &expect);
    }
}

#[test]
fn fast_and_safe_paths_agree_on_random_scalars() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let mut rng = StdRng::seed_from_u64(0xec5afe);
    for _ in 0..100 {
        let mut d = vec![0 as Word; c.words()];
        for w in d.iter_mut() {
            *w = rng.gen();
        }
        // keep below the order
        while stb_zz::cmp(&d, c.order()) != core::cmp::Ordering::Less {
            stb_zz::shr_assign(&mut d, 1);
        }
        let fast = c.mul_fast(c.base(), &d, &mut stack);
        let safe = c.mul_safe(c.base(), &d, &mut stack);
        assert_eq!(fast, safe);
    }
}

#[test]
fn order_annihilates_and_smaller_scalars_do_not() {
    let c = curve();
    let mut stack = c.alloc_stack();
    assert!(c.mul_fast(c.base(), c.order(), &mut stack).is_infinity());
    let mut qm1 = c.order().to_vec();
    stb_zz::sub_word(&mut qm1, 1);
    let r = c.mul_fast(c.base(), &qm1, &mut stack);
    // (q−1)·G = −G
    assert_eq!(r.point().unwrap(), &c.neg_affine(c.base()));
    let zero = vec![0 as Word; c.words()];
    assert!(c.mul_safe(c.base(), &zero, &mut stack).is_infinity());
}

#[test]
fn two_term_multiplication_vector() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let d1 = scalar(&c, K2_LE);
    let d2 = scalar(&c, K3_LE);
    let g3 = c.decode_point(&point_octets(G3X, G3Y), &mut stack).unwrap();
    let expect = c.decode_point(&point_octets(SUMX, SUMY), &mut stack).unwrap();
    let sum = c.mul_add2(&d1, c.base(), &d2, &g3, &mut stack);
    assert_eq!(sum.point().unwrap(), &expect);
}

#[test]
fn three_term_multiplication_against_a_folded_scalar() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let d1 = scalar(&c, K1_LE);
    let d2 = scalar(&c, K2_LE);
    let d3 = scalar(&c, K3_LE);
    // d1·G + d2·G + d3·G must equal (d1 + d2 + d3 mod q)·G
    let mut sum = vec![0 as Word; c.words()];
    stb_zz::add_mod(&mut sum, &d1, &d2, c.order());
    let folded = sum.clone();
    stb_zz::add_mod(&mut sum, &folded, &d3, c.order());
    let lhs = c.mul_add3(&d1, c.base(), &d2, c.base(), &d3, c.base(), &mut stack);
    let rhs = c.mul_fast(c.base(), &sum, &mut stack);
    assert_eq!(lhs, rhs);
}

#[test]
fn complete_formulas_cover_every_corner() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let mut rng = StdRng::seed_from_u64(0xc0417e7e);
    for _ in 0..20 {
        let mut d = vec![0 as Word; c.words()];
        for w in d.iter_mut() {
            *w = rng.gen::<Word>() >> 1;
        }
        let p = match c.mul_fast(c.base(), &d, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => continue,
        };
        let pp = AffineOrInf::Point(p.clone());
        let np = AffineOrInf::Point(c.neg_affine(&p));
        let inf = AffineOrInf::Infinity;

        // P + (−P) = O
        assert!(c.add_complete(&pp, &np, &mut stack).is_infinity());
        // P + O = P, O + O = O
        assert_eq!(c.add_complete(&pp, &inf, &mut stack), pp);
        assert_eq!(c.add_complete(&inf, &pp, &mut stack), pp);
        assert!(c.add_complete(&inf, &inf, &mut stack).is_infinity());
        // P + P agrees with the affine doubling
        let dbl = c.dbl_affine(&p, &mut stack);
        assert_eq!(c.add_complete(&pp, &pp, &mut stack), dbl);
        // the mixed flavour agrees everywhere it is defined
        assert_eq!(c.add_complete_mixed(&pp, &p, &mut stack), dbl);
        assert_eq!(c.add_complete_mixed(&inf, &p, &mut stack), pp);
        assert!(c.add_complete_mixed(&np, &p, &mut stack).is_infinity());
        // and against the general Jacobian addition on a distinct pair
        let g = c.base().clone();
        let viaj = c.add_affine(&p, &g, &mut stack);
        let viac = c.add_complete_mixed(&pp, &g, &mut stack);
        assert_eq!(viaj, viac);
    }
}

#[test]
fn point_codec_round_trip_and_rejection() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let no = c.octets();
    let mut buf = vec![0u8; 2 * no];
    c.encode_point(&mut buf, c.base(), &mut stack);
    let back = c.decode_point(&buf, &mut stack).unwrap();
    assert_eq!(&back, c.base());
    // off-curve: flip one octet of y
    buf[no] ^= 1;
    assert!(c.decode_point(&buf, &mut stack).is_err());
    assert!(c.decode_point(&buf[..2 * no - 1], &mut stack).is_err());
}

#[test]
fn policy_dispatch_matches_the_explicit_paths() {
    let (p, a, b, q, yg) = (h2b(P_LE), h2b(A_LE), h2b(B_LE), h2b(Q_LE), h2b(YG_LE));
    let params = CurveParams {
        p: &p,
        a: &a,
        b: &b,
        yg: &yg,
        q: &q,
        cofactor: 1,
    };
    let fast = Curve::new(&params, EcPolicy { mul: MulPolicy::Fast }).unwrap();
    let safe = Curve::new(&params, EcPolicy { mul: MulPolicy::Safe }).unwrap();
    let mut stack = fast.alloc_stack();
    let d = scalar(&fast, K1_LE);
    let r1 = fast.mul(fast.base(), &d, &mut stack);
    let r2 = safe.mul(safe.base(), &d, &mut stack);
    assert_eq!(r1, r2);
}

#[test]
fn swu_lands_on_the_curve_deterministically() {
    let c = curve();
    let mut stack = c.alloc_stack();
    let mut u1 = vec![0 as Word; c.words()];
    let mut oct = vec![0u8; c.octets()];
    for (i, o) in oct.iter_mut().enumerate() {
        *o = (i as u8).wrapping_mul(37).wrapping_add(11);
    }
    oct[c.octets() - 1] = 0; // stay below p
    c.ring().from_octets(&mut u1, &oct, &mut stack).unwrap();
    let w1 = swu_map(&c, &u1, &mut stack);
    assert!(c.is_on_curve(&w1, &mut stack));
    let w2 = swu_map(&c, &u1, &mut stack);
    assert_eq!(w1, w2);
    // a different input maps elsewhere
    oct[0] ^= 0xff;
    c.ring().from_octets(&mut u1, &oct, &mut stack).unwrap();
    let w3 = swu_map(&c, &u1, &mut stack);
    assert!(c.is_on_curve(&w3, &mut stack));
    assert_ne!(w1, w3);
    // degenerate inputs still land on the curve
    let zero = vec![0 as Word; c.words()];
    let wz = swu_map(&c, &zero, &mut stack);
    assert!(c.is_on_curve(&wz, &mut stack));
}
