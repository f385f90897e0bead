// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Affine extended coordinates.

use super::{CompressedEdwardsX, CompressedEdwardsXY, EdwardsPoint};
use crate::backend::serial::curve_models;
use crate::field::FieldElement;
use crate::nap::handle_naps;
use crate::traits::{Identity, IsIdentity, ValidityCheck};
use core::ops::Neg;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A point in affine extended twisted Edwards coordinates: `(x, y)`
/// with the cached product `t = x * y`.
///
/// An `AffinePoint` corresponds to an [`EdwardsPoint`] with `Z = 1`.
/// The points at infinity are not representable in this form, which is
/// harmless on the prime-order subgroup, where every point has a
/// nonzero denominator.  Additions with one or both operands affine
/// skip the denominator multiplications, so batch work should prefer
/// this format for its fixed operand.
#[derive(Copy, Clone, Default)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) t: FieldElement,
}

impl core::fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "AffinePoint{{\n\tx: {:?},\n\ty: {:?},\n\tt: {:?}\n}}",
            &self.x, &self.y, &self.t
        )
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for AffinePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.t.zeroize();
    }
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
            t: FieldElement::ZERO,
        }
    }
}

impl IsIdentity for AffinePoint {
    fn is_identity(&self) -> bool {
        self.is_neutral()
    }
}

impl ValidityCheck for AffinePoint {
    fn is_valid(&self) -> bool {
        if self.t != &self.x * &self.y {
            return false;
        }
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = &yy - &xx.times_five();
        let rhs = &FieldElement::ONE
            + &(&crate::backend::serial::u64::constants::EDWARDS_D * &(&xx * &yy));
        lhs == rhs
    }
}

impl AffinePoint {
    /// The affine x-coordinate.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// The affine y-coordinate.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Convert to extended coordinates.  Free of field operations.
    pub fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x,
            Y: self.y,
            Z: FieldElement::ONE,
            T: self.t,
        }
    }

    /// Check whether this value is a Not-a-Point sentinel, i.e. has
    /// `x = y = 0`.  Zero-initialized points are NaPs.
    pub fn is_nap(&self) -> bool {
        bool::from(self.x.is_zero()) && bool::from(self.y.is_zero())
    }

    /// Check whether this point is at infinity.  Affine points never
    /// are; a NaP input is reported to the handler.
    pub fn is_at_infinity(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking whether an affine point is at infinity, but it is a NaP",
                false,
                &[self],
            );
        }
        false
    }

    /// Check whether this point is the neutral element, modulo the
    /// identification of `P` with `P + A` for the affine order-2 point
    /// `A = (0, -1)`.
    pub fn is_neutral(&self) -> bool {
        if self.x.is_zero().into() {
            if self.y.is_zero().into() {
                return handle_naps(
                    "Checking whether an affine point is the neutral element, but it is a NaP",
                    true,
                    &[self],
                );
            }
            return true;
        }
        false
    }

    /// Check whether this point is exactly the neutral element, without
    /// the `P ≡ P + A` identification.
    ///
    /// # Panics
    ///
    /// Panics if the `t = x * y` cache invariant is violated, which
    /// indicates internal-state corruption.
    pub fn is_neutral_exact(&self) -> bool {
        if !bool::from(self.x.is_zero()) {
            return false;
        }
        if self.y.is_zero().into() {
            return handle_naps(
                "Checking whether an affine point is exactly the neutral element, but it is a NaP",
                true,
                &[self],
            );
        }
        if !bool::from(self.t.is_zero()) {
            panic!("AffinePoint with x == 0, y != 0, t != 0 encountered");
        }
        // y is 1 or -1 here.
        self.y.is_one().into()
    }

    /// Compare with another affine point, modulo the `P ≡ P + A`
    /// identification.
    pub fn is_equal(&self, other: &AffinePoint) -> bool {
        if self.is_nap() || other.is_nap() {
            return handle_naps(
                "Comparing affine points, but a NaP was encountered",
                true,
                &[self, other],
            );
        }
        // x/y is a 2:1 invariant of {P, P + A}.
        &self.x * &other.y == &self.y * &other.x
    }

    /// Compare with another affine point exactly.
    pub fn is_equal_exact(&self, other: &AffinePoint) -> bool {
        if self.is_nap() || other.is_nap() {
            return handle_naps(
                "Comparing affine points exactly, but a NaP was encountered",
                true,
                &[self, other],
            );
        }
        self.x == other.x && self.y == other.y
    }

    /// Double this point.
    pub fn double(&self) -> EdwardsPoint {
        curve_models::add_affine(self, self).as_extended()
    }

    /// Apply the curve endomorphism.  See [`EdwardsPoint::endo`].
    pub fn endo(&self) -> EdwardsPoint {
        curve_models::endo_affine(self).as_extended()
    }

    /// Serialize to the 32-byte short format.  See
    /// [`EdwardsPoint::compress`] for the failing wrapper; affine
    /// points cannot be at infinity, so only NaPs are rejected by that
    /// path.
    pub(crate) fn compress(&self) -> CompressedEdwardsX {
        let s = match self.y.sign() {
            -1 => -&self.x,
            0 => FieldElement::ZERO,
            _ => self.x,
        };
        let bytes = s.to_bytes();
        debug_assert!(bytes[0] >> 7 == 0);
        CompressedEdwardsX(bytes)
    }

    /// Serialize to the 64-byte long format.
    pub(crate) fn compress_long(&self) -> CompressedEdwardsXY {
        let (y_abs, x_adj) = match self.y.sign() {
            -1 => (-&self.y, -&self.x),
            0 => (FieldElement::ZERO, FieldElement::ZERO),
            _ => (self.y, self.x),
        };
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&y_abs.to_bytes());
        // The absolute value is below (q+1)/2 < 2^254, leaving the two
        // prefix bits clear.
        debug_assert!(bytes[0] >> 6 == 0);
        bytes[0] |= 0x80;
        bytes[32..].copy_from_slice(&x_adj.to_bytes());
        CompressedEdwardsXY(bytes)
    }
}

impl<'a> Neg for &'a AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: -&self.x,
            y: self.y,
            t: -&self.t,
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    #[test]
    fn identity_conversion() {
        assert!(AffinePoint::identity().to_extended().is_neutral_exact());
        assert!(AffinePoint::identity().is_neutral_exact());
        assert!(AffinePoint::identity().is_valid());
    }

    #[test]
    fn default_is_nap() {
        let nap = AffinePoint::default();
        assert!(nap.is_nap());
        assert!(!nap.is_valid());
    }

    #[test]
    fn generator_roundtrip() {
        let g = constants::GENERATOR;
        let affine = g.to_affine();
        assert!(affine.is_valid());
        assert!(affine.to_extended().is_equal_exact(&g));
    }

    #[test]
    fn neg_flips_sign_of_x() {
        let g = constants::GENERATOR.to_affine();
        let minus_g = -&g;
        assert!(minus_g.is_valid());
        assert_eq!(minus_g.x(), -g.x());
        assert_eq!(minus_g.y(), g.y());
    }

    #[test]
    fn affine_equality_mod_order_two() {
        let g = constants::GENERATOR;
        let g_affine = g.to_affine();
        let translated = (&g + &constants::ORDER_TWO_POINT).to_affine();
        assert!(g_affine.is_equal(&translated));
        assert!(!g_affine.is_equal_exact(&translated));
    }
}
