// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Group operations for the Bandersnatch curve, in extended twisted
//! Edwards form.
//!
//! ## Encoding and Decoding
//!
//! Encoding is done by converting to and from the [`CompressedEdwardsX`]
//! (32-byte short form) and [`CompressedEdwardsXY`] (64-byte long form)
//! structs, typed wrappers around byte arrays.  Decompression takes a
//! `trusted` flag; untrusted data is verified to be a point of the
//! prime-order subgroup.
//!
//! ## Equality Testing
//!
//! Most protocols built on Bandersnatch work modulo the identification
//! of a point \\(P\\) with \\(P + A\\), where \\(A = (0, -1)\\) is the
//! affine point of order 2.  Equality therefore comes in two flavors:
//! [`EdwardsPoint::is_equal`] uses the identification,
//! [`EdwardsPoint::is_equal_exact`] does not.  The same split applies
//! to the neutral-element predicates.  Neither flavor is an
//! implementation of `PartialEq`, because comparisons involving
//! Not-a-Point values consult the process-wide [NaP handler](crate::nap)
//! for their result.
//!
//! ## Not-a-Point values
//!
//! A default-initialized point is a NaP: it fails every curve check and
//! operations on it produce NaPs.  See the [`crate::nap`] module for
//! the reporting policy.
//!
//! ## Validity Checking
//!
//! Unlike point types that make invalid values unrepresentable, a NaP
//! or an off-curve value can be constructed here by zero-initialization
//! or by deserializing with `trusted = true`.  The
//! [`ValidityCheck`](crate::traits::ValidityCheck) impl re-checks the
//! curve equation, and [`EdwardsPoint::is_in_subgroup`] checks
//! prime-order-subgroup membership of a curve point.
//!
//! ## Implementation
//!
//! The arithmetic uses the strongly-unified extended-coordinate
//! formulas of Hisil, Wong, Carter, and Dawson, factored through the
//! double-projective `CompletedPoint` model; see the
//! [`curve_models`](crate::backend::serial::curve_models) module.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use num_bigint::{BigInt, Sign};

use crate::backend::serial::curve_models;
use crate::backend::serial::u64::constants as backend_constants;
use crate::errors::CurveError;
use crate::field::FieldElement;
use crate::nap::handle_naps;
use crate::traits::{Identity, IsIdentity, ValidityCheck};

mod affine;

pub use affine::AffinePoint;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// The short, 32-byte encoding of a point: the field element
/// \\(x \cdot \operatorname{sign}(y)\\) in 32 big-endian bytes, under a
/// one-bit `0` prefix.
///
/// The encoded value determines the point up to the identification of
/// \\(P\\) with \\(P + A\\); decompression returns the representative
/// whose \\(y\\)-coordinate has positive sign.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsX(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsX {
    fn ct_eq(&self, other: &CompressedEdwardsX) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsX {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsX: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsX {
    /// View this `CompressedEdwardsX` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsX` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// With `trusted = false` the recovered point is verified to lie on
    /// the curve and in the prime-order subgroup; `trusted = true`
    /// skips verification and must only be used on bytes this library
    /// produced.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedFormat` when the prefix bit is not `0`;
    /// - `NonNormalizedDeserialization` when the field element is not
    ///   canonical;
    /// - `XNotOnCurve` when no curve point has this x-coordinate;
    /// - `XNotInSubgroup` when the curve points with this x-coordinate
    ///   lie outside the prime-order subgroup.
    pub fn decompress(&self, trusted: bool) -> Result<EdwardsPoint, CurveError> {
        if self.0[0] >> 7 != 0 {
            return Err(CurveError::UnrecognizedFormat);
        }
        let (x, canonical) = FieldElement::from_bytes(&self.0);
        if !bool::from(canonical) {
            return Err(CurveError::NonNormalizedDeserialization);
        }
        Ok(affine_from_x(&x, trusted)?.to_extended())
    }
}

/// The long, 64-byte encoding of a point: \\(y \cdot
/// \operatorname{sign}(y)\\) under the two-bit `10` prefix, followed by
/// \\(x \cdot \operatorname{sign}(y)\\) under a one-bit `0` prefix,
/// both in big-endian.
///
/// The long form spends the extra 32 bytes to make decompression free
/// of square-root computations.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsXY(pub [u8; 64]);

impl ConstantTimeEq for CompressedEdwardsXY {
    fn ct_eq(&self, other: &CompressedEdwardsXY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsXY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsXY: {:?}", &self.as_bytes()[..])
    }
}

impl CompressedEdwardsXY {
    /// View this `CompressedEdwardsXY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Copy this `CompressedEdwardsXY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// With `trusted = false` the coordinate pair is verified to
    /// satisfy the curve equation and lie in the prime-order subgroup.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedFormat` when the prefix bits are wrong;
    /// - `NonNormalizedDeserialization` when a field element is not
    ///   canonical;
    /// - `WrongSignY` when the y field is not the positive-sign
    ///   representative the format requires;
    /// - `NotOnCurve` / `NotInSubgroup` when untrusted verification
    ///   fails.
    pub fn decompress(&self, trusted: bool) -> Result<EdwardsPoint, CurveError> {
        if self.0[0] >> 6 != 0b10 {
            return Err(CurveError::UnrecognizedFormat);
        }
        let mut y_bytes = [0u8; 32];
        y_bytes.copy_from_slice(&self.0[..32]);
        y_bytes[0] &= 0x3f;
        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&self.0[32..]);
        if x_bytes[0] >> 7 != 0 {
            return Err(CurveError::UnrecognizedFormat);
        }

        let (y, y_canonical) = FieldElement::from_bytes(&y_bytes);
        let (x, x_canonical) = FieldElement::from_bytes(&x_bytes);
        if !bool::from(y_canonical & x_canonical) {
            return Err(CurveError::NonNormalizedDeserialization);
        }
        if y.sign() < 0 {
            return Err(CurveError::WrongSignY);
        }

        if !trusted {
            let xx = x.square();
            let yy = y.square();
            let lhs = &yy - &xx.times_five();
            let rhs =
                &FieldElement::ONE + &(&backend_constants::EDWARDS_D * &(&xx * &yy));
            if lhs != rhs {
                return Err(CurveError::NotOnCurve);
            }
            // Given a rational y, x belongs to a subgroup point exactly
            // when 1 - a*x^2 = 1 + 5x^2 is a square.
            if (&FieldElement::ONE + &xx.times_five()).legendre() != 1 {
                return Err(CurveError::NotInSubgroup);
            }
        }

        let t = &x * &y;
        Ok(AffinePoint { x, y, t }.to_extended())
    }
}

/// Recover the affine point with the given x-coordinate and
/// positive-sign y, verifying curve and subgroup membership unless
/// `trusted`.
fn affine_from_x(x: &FieldElement, trusted: bool) -> Result<AffinePoint, CurveError> {
    let xx = x.square();
    // y^2 = (1 - a*x^2) / (1 - d*x^2); the denominator cannot vanish
    // because d is a non-square.
    let num = &FieldElement::ONE + &xx.times_five();
    let den = &FieldElement::ONE - &(&backend_constants::EDWARDS_D * &xx);
    let yy = num.divide(&den).map_err(|_| CurveError::XNotOnCurve)?;

    if !trusted {
        if yy.legendre() == -1 {
            return Err(CurveError::XNotOnCurve);
        }
        if num.legendre() != 1 {
            return Err(CurveError::XNotInSubgroup);
        }
    }

    let y = yy.sqrt().ok_or(CurveError::XNotOnCurve)?;
    let y = if y.sign() < 0 { -&y } else { y };
    let t = x * &y;
    Ok(AffinePoint { x: *x, y, t })
}

/// Deserialize a point from either encoding, detected from the prefix
/// bits of the leading byte: `0` selects the 32-byte short form, `10`
/// the 64-byte long form.
///
/// # Errors
///
/// `UnrecognizedFormat` when the prefix matches neither form or the
/// input length does not match the detected form, plus the errors of
/// the selected `decompress`.
pub fn decompress_auto(bytes: &[u8], trusted: bool) -> Result<EdwardsPoint, CurveError> {
    let first = *bytes.first().ok_or(CurveError::UnrecognizedFormat)?;
    if first >> 7 == 0 {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CurveError::UnrecognizedFormat)?;
        CompressedEdwardsX(arr).decompress(trusted)
    } else if first >> 6 == 0b10 {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CurveError::UnrecognizedFormat)?;
        CompressedEdwardsXY(arr).decompress(trusted)
    } else {
        Err(CurveError::UnrecognizedFormat)
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for CompressedEdwardsX {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CompressedEdwardsX {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CompressedEdwardsXVisitor;

        impl<'de> Visitor<'de> for CompressedEdwardsXVisitor {
            type Value = CompressedEdwardsX;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("32 bytes of short-form point data")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CompressedEdwardsX, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                Ok(CompressedEdwardsX(bytes))
            }
        }

        deserializer.deserialize_tuple(32, CompressedEdwardsXVisitor)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CompressedEdwardsXY {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(64)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CompressedEdwardsXY {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CompressedEdwardsXYVisitor;

        impl<'de> Visitor<'de> for CompressedEdwardsXYVisitor {
            type Value = CompressedEdwardsXY;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("64 bytes of long-form point data")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CompressedEdwardsXY, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 64];
                #[allow(clippy::needless_range_loop)]
                for i in 0..64 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 64 bytes"))?;
                }
                Ok(CompressedEdwardsXY(bytes))
            }
        }

        deserializer.deserialize_tuple(64, CompressedEdwardsXYVisitor)
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Bandersnatch curve in
/// extended twisted Edwards coordinates \\((X : Y : T : Z)\\) with
/// \\(x = X/Z\\), \\(y = Y/Z\\) and \\(T Z = X Y\\).
///
/// The two points at infinity of the projective closure are
/// representable (they have \\(Z = 0\\)); they are not in the
/// prime-order subgroup, and the only operation defined on them beyond
/// the group law is [`EdwardsPoint::endo_full`].
#[derive(Copy, Clone, Default)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for EdwardsPoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
        self.T.zeroize();
    }
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl IsIdentity for EdwardsPoint {
    fn is_identity(&self) -> bool {
        self.is_neutral()
    }
}

impl ValidityCheck for EdwardsPoint {
    /// Check that this is a rational point of the affine curve: the
    /// auxiliary coordinate must be consistent (\\(XY = TZ\\)) and the
    /// dehomogenized curve equation \\(-5X^2 + Y^2 = Z^2 + dT^2\\) must
    /// hold.  The points at infinity and NaPs fail this check.
    fn is_valid(&self) -> bool {
        if self.Z.is_zero().into() {
            return false;
        }
        if &self.X * &self.Y != &self.T * &self.Z {
            return false;
        }
        let u = &(&self.Z.square() + &(&backend_constants::EDWARDS_D * &self.T.square()))
            - &self.Y.square();
        (&u + &self.X.square().times_five()).is_zero().into()
    }
}

impl EdwardsPoint {
    /// Check whether this value is a Not-a-Point sentinel.
    ///
    /// In extended coordinates NaPs have \\(X = Y = 0\\) or
    /// \\(Z = T = 0\\); zero-initialized points are NaPs.
    pub fn is_nap(&self) -> bool {
        (bool::from(self.X.is_zero()) && bool::from(self.Y.is_zero()))
            || (bool::from(self.Z.is_zero()) && bool::from(self.T.is_zero()))
    }

    /// Check whether this point is one of the two points at infinity.
    pub fn is_at_infinity(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking whether an extended point is at infinity, but it is a NaP",
                false,
                &[self],
            );
        }
        self.Z.is_zero().into()
    }

    /// Check whether this point is the neutral element, modulo the
    /// identification of \\(P\\) with \\(P + A\\) for the affine
    /// order-2 point \\(A\\).
    ///
    /// Use [`EdwardsPoint::is_neutral_exact`] to test without the
    /// identification.
    pub fn is_neutral(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking whether an extended point is the neutral element, but it is a NaP",
                true,
                &[self],
            );
        }
        self.X.is_zero().into()
    }

    /// Check whether this point is exactly the neutral element.
    pub fn is_neutral_exact(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking whether an extended point is exactly the neutral element, but it is a NaP",
                true,
                &[self],
            );
        }
        if !bool::from(self.X.is_zero()) {
            return false;
        }
        // x == 0 leaves y = ±z; only +z is the neutral element.
        self.Y == self.Z
    }

    /// Check membership in the prime-order subgroup (together with its
    /// coset by the affine order-2 point, the "good subgroup").
    ///
    /// Assumes the point is on the curve; combine with
    /// [`ValidityCheck::is_valid`] for untrusted data.  The criterion
    /// is quadratic-residuosity of \\(1 - ax^2\\), projectively
    /// \\(Z^2 + 5X^2\\).
    pub fn is_in_subgroup(&self) -> bool {
        if self.is_nap() {
            return handle_naps(
                "Checking subgroup membership, but the point is a NaP",
                false,
                &[self],
            );
        }
        let u = &self.Z.square() + &self.X.square().times_five();
        u.legendre() == 1
    }

    /// Compare with another point, modulo the identification of
    /// \\(P\\) with \\(P + A\\).
    ///
    /// The map \\(P \mapsto x/y\\) is exactly 2:1 with fibers
    /// \\(\\{P, P + A\\}\\), so the comparison cross-multiplies the
    /// quotients.
    pub fn is_equal(&self, other: &EdwardsPoint) -> bool {
        if self.is_nap() || other.is_nap() {
            return handle_naps(
                "Comparing extended points, but a NaP was encountered",
                true,
                &[self, other],
            );
        }
        &self.X * &other.Y == &self.Y * &other.X
    }

    /// Compare with another point exactly, without the
    /// \\(P \equiv P + A\\) identification.  Works for all rational
    /// points, including the points at infinity.
    pub fn is_equal_exact(&self, other: &EdwardsPoint) -> bool {
        if self.is_nap() || other.is_nap() {
            return handle_naps(
                "Comparing extended points exactly, but a NaP was encountered",
                true,
                &[self, other],
            );
        }
        if self.Z.is_zero().into() {
            if !bool::from(other.Z.is_zero()) {
                return false;
            }
            // Both infinite: Y = Z = 0 and X, T nonzero; compare X/T.
            return &self.X * &other.T == &self.T * &other.X;
        }
        if other.Z.is_zero().into() {
            return false;
        }
        if &self.X * &other.Z != &self.Z * &other.X {
            return false;
        }
        &self.Y * &other.Z == &self.Z * &other.Y
    }

    /// Convert to affine extended coordinates.
    ///
    /// A NaP input is reported to the NaP handler and propagates as the
    /// affine NaP.
    ///
    /// # Panics
    ///
    /// Panics on the points at infinity, which have no affine form.
    pub fn to_affine(&self) -> AffinePoint {
        if self.is_nap() {
            handle_naps(
                "Trying to convert an extended NaP to affine coordinates",
                false,
                &[self],
            );
            return AffinePoint::default();
        }
        let zinv = match self.Z.invert() {
            Ok(zinv) => zinv,
            Err(_) => panic!("Trying to convert a point at infinity to affine coordinates"),
        };
        AffinePoint {
            x: &self.X * &zinv,
            y: &self.Y * &zinv,
            t: &self.T * &zinv,
        }
    }

    /// Double this point.
    ///
    /// The strongly-unified addition formula doubles correctly, so this
    /// simply forwards to addition.
    pub fn double(&self) -> EdwardsPoint {
        curve_models::add_extended(self, self).as_extended()
    }

    /// Multiply by the cofactor, i.e. compute \\([4]P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.double().double()
    }

    /// Apply the degree-2 isogeny \\(\psi\\), which acts on the
    /// prime-order subgroup as multiplication by the eigenvalue
    /// \\(\lambda\\) with \\(\lambda^2 \equiv -2 \pmod p\\).
    ///
    /// The kernel is \\(\\{\mathcal O, A\\}\\); both map to the neutral
    /// element.  The result is undefined for the two points at
    /// infinity; use [`EdwardsPoint::endo_full`] when the input may be
    /// infinite.
    pub fn endo(&self) -> EdwardsPoint {
        curve_models::endo_extended(self).as_extended()
    }

    /// Apply \\(\psi\\), additionally handling the points at infinity:
    /// both map to the affine order-2 point \\(A\\).  The image is
    /// never a point at infinity.
    pub fn endo_full(&self) -> EdwardsPoint {
        if self.is_at_infinity() {
            return crate::constants::ORDER_TWO_POINT;
        }
        self.endo()
    }

    /// Multiply by an arbitrary signed integer, by plain double-and-add
    /// in time variable in the scalar.
    ///
    /// This is the reference path: slow but independent of the GLV
    /// machinery, which is checked against it.
    pub fn mul_bigint_vartime(&self, scalar: &BigInt) -> EdwardsPoint {
        let base = if scalar.sign() == Sign::Minus {
            -self
        } else {
            *self
        };
        let magnitude = scalar.magnitude();
        let mut acc = EdwardsPoint::identity();
        for i in (0..magnitude.bits()).rev() {
            acc = acc.double();
            if magnitude.bit(i) {
                acc = &acc + &base;
            }
        }
        acc
    }

    /// Serialize to the 32-byte short format.
    ///
    /// # Errors
    ///
    /// `CannotSerializePointAtInfinity` and `CannotSerializeNaP` (the
    /// latter after reporting to the NaP handler).
    pub fn compress(&self) -> Result<CompressedEdwardsX, CurveError> {
        Ok(self.checked_affine()?.compress())
    }

    /// Serialize to the 64-byte long format.
    ///
    /// # Errors
    ///
    /// As for [`EdwardsPoint::compress`].
    pub fn compress_long(&self) -> Result<CompressedEdwardsXY, CurveError> {
        Ok(self.checked_affine()?.compress_long())
    }

    fn checked_affine(&self) -> Result<AffinePoint, CurveError> {
        if self.is_nap() {
            handle_naps("Trying to serialize a NaP", false, &[self]);
            return Err(CurveError::CannotSerializeNaP);
        }
        let zinv = self
            .Z
            .invert()
            .map_err(|_| CurveError::CannotSerializePointAtInfinity)?;
        Ok(AffinePoint {
            x: &self.X * &zinv,
            y: &self.Y * &zinv,
            t: &self.T * &zinv,
        })
    }
}

// ------------------------------------------------------------------------
// Group-law operators
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        curve_models::add_extended(self, other).as_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Add<&'b AffinePoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, other: &'b AffinePoint) -> EdwardsPoint {
        curve_models::add_mixed(self, other).as_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = AffinePoint, Output = EdwardsPoint);

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a AffinePoint {
    type Output = EdwardsPoint;

    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        curve_models::add_mixed(other, self).as_extended()
    }
}

define_add_variants!(LHS = AffinePoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Add<&'b AffinePoint> for &'a AffinePoint {
    type Output = EdwardsPoint;

    fn add(self, other: &'b AffinePoint) -> EdwardsPoint {
        curve_models::add_affine(self, other).as_extended()
    }
}

define_add_variants!(LHS = AffinePoint, RHS = AffinePoint, Output = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        curve_models::sub_extended(self, other).as_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Sub<&'b AffinePoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &'b AffinePoint) -> EdwardsPoint {
        curve_models::sub_mixed(self, other).as_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = AffinePoint, Output = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a AffinePoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        curve_models::sub_extended(&self.to_extended(), other).as_extended()
    }
}

define_sub_variants!(LHS = AffinePoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Sub<&'b AffinePoint> for &'a AffinePoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &'b AffinePoint) -> EdwardsPoint {
        curve_models::sub_affine(self, other).as_extended()
    }
}

define_sub_variants!(LHS = AffinePoint, RHS = AffinePoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'b> AddAssign<&'b AffinePoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b AffinePoint) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = AffinePoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'b> SubAssign<&'b AffinePoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b AffinePoint) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = AffinePoint);

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -&self.X,
            Y: self.Y,
            Z: self.Z,
            T: -&self.T,
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
