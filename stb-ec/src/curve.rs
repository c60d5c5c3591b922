use crate::point::{Affine, AffineOrInf};
use crate::EcPolicy;
use core::cmp::Ordering;
use stb_qr::Ring;
use stb_types::{words_from_octets, Error, Result, Word};

/// Numeric curve parameters, little-endian octet strings of equal length.
///
/// The base point is `(0, y_g)`: the standard curves pin the abscissa to
/// zero and publish only the ordinate.
#[derive(Clone, Copy, Debug)]
pub struct CurveParams<'a> {
    /// Field prime `p ≡ 3 (mod 4)`.
    pub p: &'a [u8],
    /// Coefficient `A` of `y² = x³ + Ax + B`.
    pub a: &'a [u8],
    /// Coefficient `B`.
    pub b: &'a [u8],
    /// Ordinate of the base point `G = (0, y_g)`.
    pub yg: &'a [u8],
    /// Odd subgroup order `q ≠ p`.
    pub q: &'a [u8],
    /// Subgroup cofactor; 1 for the standard curves.
    pub cofactor: Word,
}

/// An immutable curve descriptor over a Montgomery-form prime field.
#[derive(Clone, Debug)]
pub struct Curve {
    f: Ring,
    a: Vec<Word>,
    b: Vec<Word>,
    b3: Vec<Word>,
    base: Affine,
    order: Vec<Word>,
    cofactor: Word,
    policy: EcPolicy,
    sqrt_exp: Vec<Word>,
}

impl Curve {
    /// Validate the parameters that are intrinsic to the curve group and
    /// build the descriptor. Fails with [`Error::BadParams`] on:
    /// `p` even or `p ≢ 3 (mod 4)`; coefficient or ordinate out of range;
    /// `B = 0`; zero discriminant; `q` even, equal to `p` or not
    /// annihilating the base point; a base ordinate off the curve.
    pub fn new(params: &CurveParams<'_>, policy: EcPolicy) -> Result<Curve> {
        let f = Ring::new_montgomery(params.p).map_err(|_| Error::BadParams)?;
        let no = f.octets();
        if params.p[0] & 3 != 3 {
            return Err(Error::BadParams);
        }
        if params.a.len() != no
            || params.b.len() != no
            || params.yg.len() != no
            || params.q.len() != no
        {
            return Err(Error::BadParams);
        }
        let n = f.words();
        let mut stack = vec![0 as Word; f.deep() + 4 * n];
        let mut a = vec![0; n];
        let mut b = vec![0; n];
        let mut yg = vec![0; n];
        f.from_octets(&mut a, params.a, &mut stack)
            .map_err(|_| Error::BadParams)?;
        f.from_octets(&mut b, params.b, &mut stack)
            .map_err(|_| Error::BadParams)?;
        f.from_octets(&mut yg, params.yg, &mut stack)
            .map_err(|_| Error::BadParams)?;
        if f.is_zero_elem(&b) {
            return Err(Error::BadParams);
        }

        let mut order = vec![0; n];
        words_from_octets(&mut order, params.q);
        if order[0] & 1 == 0 || stb_zz::is_zero(&order) {
            return Err(Error::BadParams);
        }
        if stb_zz::cmp(&order, f.modulus()) == Ordering::Equal {
            return Err(Error::BadParams);
        }

        // 4A³ + 27B² ≠ 0
        {
            let (t1, rest) = stack.split_at_mut(n);
            let (t2, rest) = rest.split_at_mut(n);
            let (t3, rest) = rest.split_at_mut(n);
            f.sqr(t1, &a, rest);
            f.mul_assign(t1, &a, rest);
            f.double_assign(t1);
            f.double_assign(t1); // 4A³
            f.sqr(t2, &b, rest);
            t3.fill(0);
            for _ in 0..27 {
                f.add_assign(t3, t2);
            }
            f.add_assign(t1, t3);
            if f.is_zero_elem(t1) {
                return Err(Error::BadParams);
            }
        }

        // G = (0, yg) on the curve means yg² = B
        {
            let (t1, rest) = stack.split_at_mut(n);
            f.sqr(t1, &yg, rest);
            if !f.equal(t1, &b) {
                return Err(Error::BadParams);
            }
        }

        // B·3 for the complete formulas
        let mut b3 = vec![0; n];
        f.double(&mut b3, &b);
        f.add_assign(&mut b3, &b);

        // (p+1)/4 = (p−3)/4 + 1 for square roots, exact since p ≡ 3 (4)
        let mut sqrt_exp = f.modulus().to_vec();
        stb_zz::sub_word(&mut sqrt_exp, 3);
        stb_zz::shr_assign(&mut sqrt_exp, 2);
        stb_zz::add_word(&mut sqrt_exp, 1);

        let curve = Curve {
            f,
            a,
            b,
            b3,
            base: Affine::new(vec![0; n], yg),
            order,
            cofactor: params.cofactor,
            policy,
            sqrt_exp,
        };

        // the declared order must annihilate the base point
        let mut stack = curve.alloc_stack();
        match curve.mul_fast(&curve.base, &curve.order, &mut stack) {
            AffineOrInf::Infinity => Ok(curve),
            AffineOrInf::Point(_) => Err(Error::BadParams),
        }
    }

    /// The field ring.
    pub fn ring(&self) -> &Ring {
        &self.f
    }

    /// Coefficient `A` in field representation.
    pub fn a_coeff(&self) -> &[Word] {
        &self.a
    }

    /// Coefficient `B` in field representation.
    pub fn b_coeff(&self) -> &[Word] {
        &self.b
    }

    pub(crate) fn b3_coeff(&self) -> &[Word] {
        &self.b3
    }

    pub(crate) fn sqrt_exp(&self) -> &[Word] {
        &self.sqrt_exp
    }

    /// The base point `G`.
    pub fn base(&self) -> &Affine {
        &self.base
    }

    /// The subgroup order `q`, little-endian words.
    pub fn order(&self) -> &[Word] {
        &self.order
    }

    /// The subgroup cofactor.
    pub fn cofactor(&self) -> Word {
        self.cofactor
    }

    /// The frozen algorithm policy.
    pub fn policy(&self) -> EcPolicy {
        self.policy
    }

    /// Field element length in words.
    pub fn words(&self) -> usize {
        self.f.words()
    }

    /// Field element length in octets; point encodings take twice this.
    pub fn octets(&self) -> usize {
        self.f.octets()
    }

    /// Maximum scratch words any curve operation requires.
    pub fn deep(&self) -> usize {
        // the deepest chain is the general addition falling back to a
        // doubling, plus the field ring's own scratch
        24 * self.words() + self.f.deep()
    }

    /// A scratch buffer covering [`Curve::deep`].
    pub fn alloc_stack(&self) -> Vec<Word> {
        vec![0; self.deep()]
    }

    /// `true` iff `y² = x³ + Ax + B` holds for the affine pair.
    pub fn is_on_curve(&self, p: &Affine, stack: &mut [Word]) -> bool {
        let n = self.words();
        let (lhs, rest) = stack.split_at_mut(n);
        let (rhs, rest) = rest.split_at_mut(n);
        self.f.sqr(lhs, &p.y, rest);
        self.f.sqr(rhs, &p.x, rest);
        self.f.mul_assign(rhs, &p.x, rest);
        let (t, rest) = rest.split_at_mut(n);
        self.f.mul(t, &self.a, &p.x, rest);
        self.f.add_assign(rhs, t);
        self.f.add_assign(rhs, &self.b);
        self.f.equal(lhs, rhs)
    }

    /// Negate an affine point.
    pub fn neg_affine(&self, p: &Affine) -> Affine {
        let mut y = vec![0; self.words()];
        self.f.neg(&mut y, &p.y);
        Affine::new(p.x.clone(), y)
    }

    /// Decode `(x ‖ y)` little-endian octets, `2·no` long, verifying the
    /// point lies on the curve.
    pub fn decode_point(&self, octets: &[u8], stack: &mut [Word]) -> Result<Affine> {
        let no = self.octets();
        if octets.len() != 2 * no {
            return Err(Error::BadPoint);
        }
        let n = self.words();
        let mut x = vec![0; n];
        let mut y = vec![0; n];
        self.f
            .from_octets(&mut x, &octets[..no], stack)
            .map_err(|_| Error::BadPoint)?;
        self.f
            .from_octets(&mut y, &octets[no..], stack)
            .map_err(|_| Error::BadPoint)?;
        let p = Affine::new(x, y);
        if !self.is_on_curve(&p, stack) {
            return Err(Error::BadPoint);
        }
        Ok(p)
    }

    /// Encode an affine point as `(x ‖ y)`, `2·no` octets.
    pub fn encode_point(&self, out: &mut [u8], p: &Affine, stack: &mut [Word]) {
        let no = self.octets();
        debug_assert_eq!(out.len(), 2 * no);
        self.f.to_octets(&mut out[..no], &p.x, stack);
        self.f.to_octets(&mut out[no..], &p.y, stack);
    }

    /// Encode only the abscissa, `no` octets.
    pub fn encode_point_x(&self, out: &mut [u8], p: &Affine, stack: &mut [Word]) {
        debug_assert_eq!(out.len(), self.octets());
        self.f.to_octets(out, &p.x, stack);
    }

    /// Affine doubling through the Jacobian formulas.
    pub fn dbl_affine(&self, p: &Affine, stack: &mut [Word]) -> AffineOrInf {
        let n = self.words();
        let mut j = vec![0 as Word; 3 * n];
        crate::jacobian::lift_affine(self, &mut j, p);
        let mut d = vec![0 as Word; 3 * n];
        crate::jacobian::dbl_j(self, &mut d, &j, stack);
        crate::jacobian::j_to_affine(self, &d, stack)
    }

    /// Affine addition through the Jacobian formulas, with the
    /// equality/opposition cases short-circuited to doubling or infinity.
    pub fn add_affine(&self, p: &Affine, q: &Affine, stack: &mut [Word]) -> AffineOrInf {
        let n = self.words();
        let mut jp = vec![0 as Word; 3 * n];
        let mut jq = vec![0 as Word; 3 * n];
        crate::jacobian::lift_affine(self, &mut jp, p);
        crate::jacobian::lift_affine(self, &mut jq, q);
        let mut s = vec![0 as Word; 3 * n];
        crate::jacobian::add_j(self, &mut s, &jp, &jq, stack);
        crate::jacobian::j_to_affine(self, &s, stack)
    }

    /// Exception-free addition through the complete homogeneous formulas;
    /// either operand (and the result) may be the identity.
    pub fn add_complete(
        &self,
        p: &AffineOrInf,
        q: &AffineOrInf,
        stack: &mut [Word],
    ) -> AffineOrInf {
        let n = self.words();
        let mut jp = vec![0 as Word; 3 * n];
        let mut jq = vec![0 as Word; 3 * n];
        match p {
            AffineOrInf::Point(a) => crate::jacobian::lift_affine(self, &mut jp, a),
            AffineOrInf::Infinity => crate::jacobian::set_infinity(self, &mut jp),
        }
        match q {
            AffineOrInf::Point(a) => crate::jacobian::lift_affine(self, &mut jq, a),
            AffineOrInf::Infinity => crate::jacobian::set_infinity(self, &mut jq),
        }
        let (h1, stack) = stack.split_at_mut(3 * n);
        let (h2, stack) = stack.split_at_mut(3 * n);
        let (hs, stack) = stack.split_at_mut(3 * n);
        crate::complete::j_to_h(self, h1, &jp, stack);
        crate::complete::j_to_h(self, h2, &jq, stack);
        crate::complete::add_h(self, hs, h1, h2, stack);
        crate::complete::h_to_affine(self, hs, stack)
    }

    /// Exception-free mixed addition: the second operand is a finite
    /// affine point.
    pub fn add_complete_mixed(
        &self,
        p: &AffineOrInf,
        q: &Affine,
        stack: &mut [Word],
    ) -> AffineOrInf {
        let n = self.words();
        let mut jp = vec![0 as Word; 3 * n];
        match p {
            AffineOrInf::Point(a) => crate::jacobian::lift_affine(self, &mut jp, a),
            AffineOrInf::Infinity => crate::jacobian::set_infinity(self, &mut jp),
        }
        let (h1, stack) = stack.split_at_mut(3 * n);
        let (hs, stack) = stack.split_at_mut(3 * n);
        crate::complete::j_to_h(self, h1, &jp, stack);
        crate::complete::madd_h(self, hs, h1, q, stack);
        crate::complete::h_to_affine(self, hs, stack)
    }

    /// Scalar multiplication along the policy path; `d` must be below the
    /// subgroup order. Returns the identity exactly when `d = 0`.
    pub fn mul(&self, p: &Affine, d: &[Word], stack: &mut [Word]) -> AffineOrInf {
        match self.policy.mul {
            crate::MulPolicy::Fast => self.mul_fast(p, d, stack),
            crate::MulPolicy::Safe => self.mul_safe(p, d, stack),
        }
    }
}
