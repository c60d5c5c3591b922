//! Public point representations.

use stb_types::Word;
use zeroize::Zeroize;

/// An affine point in the field ring's internal representation.
///
/// Affine coordinates cannot express the point at infinity; any `Affine`
/// obtained from this crate lies on its curve. Results that may be the
/// identity are [`AffineOrInf`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affine {
    pub(crate) x: Vec<Word>,
    pub(crate) y: Vec<Word>,
}

impl Affine {
    pub(crate) fn new(x: Vec<Word>, y: Vec<Word>) -> Affine {
        debug_assert_eq!(x.len(), y.len());
        Affine { x, y }
    }

    /// The x-coordinate words (internal field representation).
    pub fn x(&self) -> &[Word] {
        &self.x
    }

    /// The y-coordinate words (internal field representation).
    pub fn y(&self) -> &[Word] {
        &self.y
    }
}

impl Zeroize for Affine {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

/// A scalar-multiplication or addition result: a proper point or the
/// group identity, stated explicitly rather than through a zero `Z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AffineOrInf {
    /// A finite curve point.
    Point(Affine),
    /// The point at infinity.
    Infinity,
}

impl AffineOrInf {
    /// The finite point, if any.
    pub fn point(&self) -> Option<&Affine> {
        match self {
            AffineOrInf::Point(p) => Some(p),
            AffineOrInf::Infinity => None,
        }
    }

    /// `true` for the identity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, AffineOrInf::Infinity)
    }
}

impl From<Affine> for AffineOrInf {
    fn from(p: Affine) -> Self {
        AffineOrInf::Point(p)
    }
}
