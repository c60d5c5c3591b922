//! Validation of the standard parameter blocks and their
//! tamper-resistance, across all three security levels.

use stb_bign::{bign_start, val_params, val_params_binding, StdCurve};

const CURVES: [StdCurve; 3] = [
    StdCurve::Curve256v1,
    StdCurve::Curve384v1,
    StdCurve::Curve512v1,
];

#[test]
fn every_standard_block_validates() {
    for c in CURVES {
        let params = c.params().unwrap();
        assert_eq!(params.l, c.level());
        val_params(&params).unwrap();
        let curve = bign_start(&params).unwrap();
        assert_eq!(curve.octets(), c.level() / 4);
        assert_eq!(curve.cofactor(), 1);
    }
}

#[test]
fn oid_round_trip() {
    for c in CURVES {
        assert_eq!(StdCurve::from_oid(c.oid()).unwrap(), c);
    }
    assert!(StdCurve::from_oid("1.2.112.0.2.0.34.101.45.3.9").is_err());
}

#[test]
fn any_single_octet_flip_fails_validation() {
    for c in CURVES {
        let base = c.params().unwrap();

        let mut p = base.clone();
        p.p[11] ^= 0x20;
        assert!(val_params(&p).is_err(), "{:?} p", c);

        let mut a = base.clone();
        a.a[0] ^= 0x01;
        assert!(val_params(&a).is_err(), "{:?} a", c);

        let mut b = base.clone();
        b.b[17] ^= 0x80;
        assert!(val_params(&b).is_err(), "{:?} b", c);

        let mut q = base.clone();
        q.q[5] ^= 0x10;
        assert!(val_params(&q).is_err(), "{:?} q", c);

        let mut yg = base.clone();
        yg.yg[30] ^= 0x02;
        assert!(val_params(&yg).is_err(), "{:?} yg", c);
    }
}

#[test]
fn seed_tampering_fails_the_binding() {
    for c in CURVES {
        let mut params = c.params().unwrap();
        params.seed[2] ^= 0x08;
        assert!(val_params_binding(&params).is_err(), "{:?}", c);
    }
}

#[test]
fn truncated_fields_are_rejected() {
    let mut params = StdCurve::Curve256v1.params().unwrap();
    params.q.pop();
    assert!(val_params(&params).is_err());
    assert!(bign_start(&params).is_err());
}
