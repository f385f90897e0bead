// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Internal curve representations.
//!
//! # Curve representations
//!
//! Internally, we use three models for the curve.
//!
//! Begin with the affine equation for the curve,
//! $$
//!     -5x\^2 + y\^2 = 1 + dx\^2y\^2.
//! $$
//! Passing to the projective closure \\(\mathbb P\^1 \times \mathbb
//! P\^1\\) by setting \\(x = X/Z\\), \\(y = Y/T\\) gives each coordinate
//! its own denominator; this "double-projective" model is represented by
//! the `CompletedPoint` struct.  Viewed through the Segre embedding
//! \\( ((X:Z),(Y:T)) \mapsto (XT:YZ:ZT:XY) \\) one obtains the
//! "extended" model of Hisil, Wong, Carter, and Dawson, represented by
//! the `EdwardsPoint` struct, and fixing the projective scale to
//! \\(Z = 1\\) gives the affine extended model, `AffinePoint`.
//!
//! # Passing between curve models
//!
//! All of the addition formulas *produce* a point whose four products
//! have not yet been multiplied out, i.e. a `CompletedPoint`; converting
//! back to the extended model costs four multiplications, and skipping
//! the conversion is worthwhile whenever the next operation does not
//! need every product (the doubling and endomorphism formulas ignore
//! the input's \\(T\\) coordinate).  Hot paths should therefore keep
//! their operands in (`EdwardsPoint`, `AffinePoint`) pairs and convert
//! `CompletedPoint` results only when needed.
//!
//! No valid point ever has \\(T = 0\\) or \\(Y = 0\\) in completed
//! coordinates; the coordinate that may vanish on the prime-order
//! subgroup is \\(X\\) (at the neutral element).  The two points at
//! infinity have \\(Z = 0\\).

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::Neg;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::constants;
use crate::edwards::{AffinePoint, EdwardsPoint};
use crate::field::FieldElement;
use crate::nap::handle_naps;
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A `CompletedPoint` is a point \\(((X:Z), (Y:T))\\) on the \\(\mathbb
/// P\^1 \times \mathbb P\^1 \\) model of the curve.
/// A point (x,y) in the affine model corresponds to \\( ((x:1),(y:1))
/// \\).
///
/// More details on the relationships between the different curve models
/// can be found in the module-level documentation.
#[derive(Copy, Clone, Default)]
#[allow(missing_docs)]
pub struct CompletedPoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
    pub T: FieldElement,
}

impl Debug for CompletedPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "CompletedPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompletedPoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
        self.T.zeroize();
    }
}

impl Identity for CompletedPoint {
    fn identity() -> CompletedPoint {
        CompletedPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ONE,
        }
    }
}

// ------------------------------------------------------------------------
// NaP and exceptional-point detection
// ------------------------------------------------------------------------

impl CompletedPoint {
    /// Check whether this value is a Not-a-Point sentinel.
    ///
    /// NaPs in completed coordinates have \\(Y = 0\\) (all arithmetic
    /// NaPs end up here) or \\(X = Z = 0\\).  A value with \\(T = 0\\)
    /// but \\(Y \ne 0\\) cannot arise from any crate operation and
    /// indicates memory corruption.
    ///
    /// # Panics
    ///
    /// Panics on the corrupt \\(T = 0, Y \ne 0\\) combination.
    pub fn is_nap(&self) -> bool {
        if self.Y.is_zero().into() {
            return true;
        }
        if self.T.is_zero().into() {
            panic!("CompletedPoint with T == 0 but Y != 0 encountered");
        }
        bool::from(self.X.is_zero()) && bool::from(self.Z.is_zero())
    }

    /// Check whether this point is one of the two points at infinity.
    /// These are the only valid points with \\(Z = 0\\).
    pub fn is_at_infinity(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking whether a completed point is at infinity, but it is a NaP",
                false,
                &[self],
            );
        }
        self.Z.is_zero().into()
    }

    /// Check whether this point is the neutral element, modulo the
    /// identification of \\(P\\) with \\(P + A\\) for the affine
    /// order-2 point \\(A\\).  The only valid points with \\(X = 0\\)
    /// are the neutral element and \\(A\\).
    pub fn is_neutral(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Comparing a completed point with the neutral element, but it is a NaP",
                true,
                &[self],
            );
        }
        self.X.is_zero().into()
    }

    /// Check whether this point is exactly the neutral element, without
    /// the \\(P \equiv P + A\\) identification.
    pub fn is_neutral_exact(&self) -> bool {
        self.is_neutral() && self.T == self.Y
    }

    /// Apply the curve endomorphism without leaving completed
    /// coordinates.  See [`endo_completed`].
    pub fn endo(&self) -> CompletedPoint {
        endo_completed(self)
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl CompletedPoint {
    /// Convert this point to the extended model.
    ///
    /// This costs \\(4 \mathrm M\\) and needs no inversion.
    pub fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
            T: &self.X * &self.Y,
        }
    }

    /// Convert this point to the affine extended model, at the cost of
    /// one inversion.
    ///
    /// A NaP input is reported to the NaP handler and propagates.
    ///
    /// # Panics
    ///
    /// Panics on the points at infinity, which have no affine form.
    pub fn as_affine(&self) -> AffinePoint {
        if self.is_nap() {
            handle_naps(
                "Trying to convert a completed NaP to affine coordinates",
                false,
                &[self],
            );
            return AffinePoint::default();
        }
        let zt = &self.Z * &self.T;
        let inv = match zt.invert() {
            Ok(inv) => inv,
            Err(_) => panic!("Trying to convert a point at infinity to affine coordinates"),
        };
        let x = &(&self.X * &self.T) * &inv;
        let y = &(&self.Y * &self.Z) * &inv;
        let t = &x * &y;
        AffinePoint { x, y, t }
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a CompletedPoint {
    type Output = CompletedPoint;

    /// Negating \\((x, y)\\) to \\((-x, y)\\) only requires flipping
    /// the numerator of the first coordinate pair.
    fn neg(self) -> CompletedPoint {
        CompletedPoint {
            X: -&self.X,
            Y: self.Y,
            Z: self.Z,
            T: self.T,
        }
    }
}

impl Neg for CompletedPoint {
    type Output = CompletedPoint;

    fn neg(self) -> CompletedPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Addition and subtraction
// ------------------------------------------------------------------------

// The strongly-unified addition formula of Hisil-Wong-Carter-Dawson
// 2008 (https://eprint.iacr.org/2008/522, Section 3.1), specialized to
// a = -5:
//
//     A = X1*X2;  B = Y1*Y2;  C = d*T1*T2;  D = Z1*Z2
//     E = (X1+Y1)*(X2+Y2) - A - B
//     F = D - C;  G = D + C;  H = B + 5*A
//
// The sum is ((E:G), (H:F)) in completed coordinates.  The formula is
// complete on the good subgroup; its only exceptions are sums involving
// a point at infinity, which produce NaPs.
//
// Each input-shape combination gets its own core so that known-one
// denominators are never multiplied.  The public `Add`/`Sub` operators
// on the point types dispatch here and pay the completed-to-extended
// conversion; callers wanting the raw completed result use these
// directly.

/// Add two extended points.
pub fn add_extended(a: &EdwardsPoint, b: &EdwardsPoint) -> CompletedPoint {
    let A = &a.X * &b.X;
    let B = &a.Y * &b.Y;
    let C = &(&a.T * &b.T) * &constants::EDWARDS_D;
    let D = &a.Z * &b.Z;
    let E = &(&(&a.X + &a.Y) * &(&b.X + &b.Y)) - &(&A + &B);

    CompletedPoint {
        X: E,
        Y: &B + &A.times_five(),
        Z: &D + &C,
        T: &D - &C,
    }
}

/// Add an extended and an affine point; \\(Z_2 = 1\\) saves the
/// \\(D\\) multiplication.
pub fn add_mixed(a: &EdwardsPoint, b: &AffinePoint) -> CompletedPoint {
    let A = &a.X * &b.x;
    let B = &a.Y * &b.y;
    let C = &(&a.T * &b.t) * &constants::EDWARDS_D;
    let E = &(&(&a.X + &a.Y) * &(&b.x + &b.y)) - &(&A + &B);

    CompletedPoint {
        X: E,
        Y: &B + &A.times_five(),
        Z: &a.Z + &C,
        T: &a.Z - &C,
    }
}

/// Add two affine points; \\(Z_1 = Z_2 = 1\\).
pub fn add_affine(a: &AffinePoint, b: &AffinePoint) -> CompletedPoint {
    let A = &a.x * &b.x;
    let B = &a.y * &b.y;
    let C = &(&a.t * &b.t) * &constants::EDWARDS_D;
    let E = &(&(&a.x + &a.y) * &(&b.x + &b.y)) - &(&A + &B);

    CompletedPoint {
        X: E,
        Y: &B + &A.times_five(),
        Z: &FieldElement::ONE + &C,
        T: &FieldElement::ONE - &C,
    }
}

/// Subtract two extended points, as addition of the negation.
pub fn sub_extended(a: &EdwardsPoint, b: &EdwardsPoint) -> CompletedPoint {
    add_extended(a, &-b)
}

/// Subtract an affine point from an extended point.
pub fn sub_mixed(a: &EdwardsPoint, b: &AffinePoint) -> CompletedPoint {
    add_mixed(a, &-b)
}

/// Subtract two affine points.
pub fn sub_affine(a: &AffinePoint, b: &AffinePoint) -> CompletedPoint {
    add_affine(a, &-b)
}

// ------------------------------------------------------------------------
// The degree-2 isogeny
// ------------------------------------------------------------------------

// With the constants b and c of `backend::serial::u64::constants`, the
// isogeny evaluates on extended coordinates as
//
//     A = c*(Z^2 - Y^2);  B = Y^2 - b*Z^2;  C = b*(Y^2 + b*Z^2);  D = T*Z
//
// with image ((A:D), (C:B)) in completed coordinates.  The formula
// degenerates exactly on the 2-torsion: inputs with x = 0 (the neutral
// element and the affine order-2 point) are in the kernel and are
// short-circuited to the neutral element; the points at infinity are
// not handled here (see `endo_completed` and `EdwardsPoint::endo_full`).

pub(crate) fn endo_extended(input: &EdwardsPoint) -> CompletedPoint {
    if input.X.is_zero().into() {
        if input.is_nap() {
            return CompletedPoint::default();
        }
        return CompletedPoint::identity();
    }
    let zz = input.Z.square();
    let yy = input.Y.square();
    let bzz = &constants::ENDO_B * &zz;

    CompletedPoint {
        X: &constants::ENDO_C * &(&zz - &yy),
        Y: &constants::ENDO_B * &(&yy + &bzz),
        Z: &input.T * &input.Z,
        T: &yy - &bzz,
    }
}

/// Same as [`endo_extended`], with \\(Z = 1\\) simplifying the products.
pub(crate) fn endo_affine(input: &AffinePoint) -> CompletedPoint {
    if input.x.is_zero().into() {
        if input.is_nap() {
            return CompletedPoint::default();
        }
        return CompletedPoint::identity();
    }
    let yy = input.y.square();

    CompletedPoint {
        X: &constants::ENDO_C * &(&FieldElement::ONE - &yy),
        Y: &constants::ENDO_B * &(&yy + &constants::ENDO_B),
        Z: input.t,
        T: &yy - &constants::ENDO_B,
    }
}

/// The isogeny on completed coordinates.
///
/// Here \\(Y^2, Z^2\\) of the extended input become
/// \\(Y^2 Z^2 = (YZ)^2\\) etc.; the shared factors of the two
/// projective pairs cancel, leaving
///
/// ```text
///     X' = c * Z * (T^2 - Y^2)     Z' = X * Y * T
///     Y' = b * (Y^2 + b*T^2)       T' = Y^2 - b*T^2
/// ```
///
/// This variant also covers the two points at infinity (\\(Z = 0\\)):
/// both map to the affine order-2 point, so it needs no infinity
/// special case and never produces an infinite output.
pub(crate) fn endo_completed(input: &CompletedPoint) -> CompletedPoint {
    if input.X.is_zero().into() {
        if input.is_nap() {
            return CompletedPoint::default();
        }
        return CompletedPoint::identity();
    }
    let tt = input.T.square();
    let yy = input.Y.square();
    let btt = &constants::ENDO_B * &tt;

    CompletedPoint {
        X: &(&constants::ENDO_C * &input.Z) * &(&tt - &yy),
        Y: &constants::ENDO_B * &(&yy + &btt),
        Z: &(&input.X * &input.Y) * &input.T,
        T: &yy - &btt,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants as curve_constants;
    use crate::traits::ValidityCheck;

    #[test]
    fn identity_conversions() {
        let id = CompletedPoint::identity();
        assert!(id.as_extended().is_neutral_exact());
        let affine = id.as_affine();
        assert!(affine.x.is_zero().unwrap_u8() == 1);
        assert_eq!(affine.y, FieldElement::ONE);
    }

    #[test]
    fn default_is_nap() {
        assert!(CompletedPoint::default().is_nap());
    }

    #[test]
    fn completed_sum_is_valid_extended_point() {
        let g = curve_constants::GENERATOR;
        let sum = add_extended(&g, &g).as_extended();
        assert!(sum.is_valid());
    }

    #[test]
    fn mixed_and_affine_addition_agree() {
        let g = curve_constants::GENERATOR;
        let g_affine = g.to_affine();
        let full = add_extended(&g, &g).as_extended();
        let mixed = add_mixed(&g, &g_affine).as_extended();
        let affine = add_affine(&g_affine, &g_affine).as_extended();
        assert!(full.is_equal_exact(&mixed));
        assert!(full.is_equal_exact(&affine));
    }

    #[test]
    fn subtraction_of_self_is_neutral() {
        let g = curve_constants::GENERATOR;
        assert!(sub_extended(&g, &g).is_neutral());
        assert!(sub_extended(&g, &g).is_neutral_exact());
    }

    #[test]
    fn endo_variants_agree() {
        let g = curve_constants::GENERATOR;
        let from_extended = endo_extended(&g).as_extended();
        let from_affine = endo_affine(&g.to_affine()).as_extended();
        let from_completed = endo_completed(&add_extended(&g, &g)).as_extended();
        assert!(from_extended.is_equal_exact(&from_affine));
        // endo(2G) computed on the completed 2G.
        let twice = &from_extended + &from_extended;
        assert!(twice.is_equal(&from_completed));
    }

    #[test]
    fn endo_of_infinity_in_completed_coordinates() {
        // The first point at infinity, ((1 : 0), (1 : sqrt(d/a))).
        let infinity = CompletedPoint {
            X: FieldElement::ONE,
            Y: FieldElement::ONE,
            Z: FieldElement::ZERO,
            T: constants::SQRT_D_OVER_A,
        };
        assert!(infinity.is_at_infinity());
        let image = endo_completed(&infinity).as_extended();
        assert!(image.is_equal_exact(&curve_constants::ORDER_TWO_POINT));
    }

    #[test]
    #[should_panic(expected = "point at infinity")]
    fn affine_conversion_of_infinity_panics() {
        let infinity = CompletedPoint {
            X: FieldElement::ONE,
            Y: FieldElement::ONE,
            Z: FieldElement::ZERO,
            T: constants::SQRT_D_OVER_A,
        };
        let _ = infinity.as_affine();
    }
}
