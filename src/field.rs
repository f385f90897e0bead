// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Field arithmetic for the Bandersnatch base field, i.e. modulo
//! \\(q =\\) `0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
//!
//! The `bandersnatch::field` module provides a type alias
//! `bandersnatch::field::FieldElement` to the field element type defined
//! in the `backend` module.
//!
//! Field operations defined in terms of machine operations, such as
//! addition and Montgomery multiplication, live in the backend.  Field
//! operations defined in terms of other field operations — inversion,
//! square roots, the quadratic character, the serialization sign
//! convention — are defined here.

use subtle::Choice;
use subtle::ConstantTimeEq;

use num_bigint::{BigInt, BigUint};

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

use crate::backend;
use crate::backend::serial::u64::constants;
use crate::errors::CurveError;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / q \mathbb Z \\), stored as four 64-bit limbs in
/// Montgomery form.
pub type FieldElement = backend::serial::u64::field::FieldElement64;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the internal
    /// Montgomery representation is not unique, the elements are
    /// normalized to canonical byte encoding before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl FieldElement {
    /// Determine if this `FieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    /// Determine if this `FieldElement` is one.
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&FieldElement::ONE)
    }

    /// Given a nonzero field element, compute its inverse: the inverse
    /// is computed as self^(q-2), since x^(q-2)x = x^(q-1) = 1 (mod q).
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DivisionByZero` on input zero.
    pub fn invert(&self) -> Result<FieldElement, CurveError> {
        if self.is_zero().into() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow_vartime(&constants::EXP_INVERT))
    }

    /// Compute `self / rhs`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DivisionByZero` when `rhs` is zero.
    pub fn divide(&self, rhs: &FieldElement) -> Result<FieldElement, CurveError> {
        Ok(self * &rhs.invert()?)
    }

    /// The Legendre symbol of this element: `1` for a nonzero square,
    /// `-1` for a non-square, `0` for zero.
    pub fn legendre(&self) -> i8 {
        let e = self.pow_vartime(&constants::EXP_LEGENDRE);
        if bool::from(e.is_zero()) {
            0
        } else if e == FieldElement::ONE {
            1
        } else {
            -1
        }
    }

    /// Compute a square root of this element, if one exists.
    ///
    /// Uses Tonelli-Shanks; `q - 1 = 2^32 * t` with `t` odd.  When two
    /// roots exist the choice between them is deterministic (but carries
    /// no particular sign).
    pub fn sqrt(&self) -> Option<FieldElement> {
        if bool::from(self.is_zero()) {
            return Some(FieldElement::ZERO);
        }
        if self.legendre() == -1 {
            return None;
        }

        let mut m = constants::TWO_ADICITY;
        let mut c = constants::ROOT_OF_UNITY;
        let mut t = self.pow_vartime(&constants::EXP_SQRT_T);
        let mut r = self.pow_vartime(&constants::EXP_SQRT_T_PLUS_ONE_HALVED);

        while t != FieldElement::ONE {
            // Find the least i with t^(2^i) = 1; the precheck above
            // guarantees i < m.
            let mut i = 1u32;
            let mut t2 = t.square();
            while t2 != FieldElement::ONE {
                t2 = t2.square();
                i += 1;
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t = &t * &c;
            r = &r * &b;
        }
        debug_assert!(r.square() == *self);
        Some(r)
    }

    /// The sign of this element: `0` for zero, `-1` when the canonical
    /// representative is at least `(q+1)/2`, `+1` otherwise.
    ///
    /// This is the sign convention the serialization codec uses for its
    /// sign bit.
    pub fn sign(&self) -> i8 {
        let limbs = self.canonical_limbs();
        if limbs == [0u64; 4] {
            return 0;
        }
        for i in (0..4).rev() {
            if limbs[i] > constants::HALF_Q_MINUS_ONE[i] {
                return -1;
            }
            if limbs[i] < constants::HALF_Q_MINUS_ONE[i] {
                return 1;
            }
        }
        // Exactly (q-1)/2, which is in the positive range.
        1
    }

    /// Determine if this element is negative under the codec's sign
    /// convention.
    pub fn is_negative(&self) -> Choice {
        Choice::from((self.sign() == -1) as u8)
    }

    /// Reduce an arbitrary unsigned integer modulo q.
    pub fn from_biguint(n: &BigUint) -> FieldElement {
        let reduced = n % &*crate::constants::BASE_FIELD_ORDER;
        let digits = reduced.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - digits.len()..].copy_from_slice(&digits);
        FieldElement::from_bytes(&bytes).0
    }

    /// Reduce an arbitrary signed integer modulo q.
    pub fn from_bigint(n: &BigInt) -> FieldElement {
        let q = BigInt::from(crate::constants::BASE_FIELD_ORDER.clone());
        let reduced = ((n % &q) + &q) % &q;
        FieldElement::from_biguint(reduced.magnitude())
    }

    /// The canonical representative of this element as an unsigned
    /// integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }

    /// Generate a uniformly random field element.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> FieldElement {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        FieldElement::from_biguint(&BigUint::from_bytes_be(&bytes))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fe(hex_str: &str) -> FieldElement {
        let bytes: [u8; 32] = hex::decode(hex_str).unwrap().try_into().unwrap();
        FieldElement::from_bytes(&bytes).0
    }

    /// The same fixed element as the backend tests, with inverse and
    /// square-root values computed independently.
    const A_HEX: &str = "123456789abcdef0fedcba9876543210deadbeefcafebabe0123456789abcdef";
    const A_INV_HEX: &str = "3fb466b99da54c20aa7c1db7b3b562b69e44a05d46bd22cff3aa78032d23094f";
    const SQRT_A_SQUARED_HEX: &str =
        "61b950da8ee09e57345d1d6f934da5f4750fe51334ffa140fedcba9776543212";

    #[test]
    fn invert_known_answer() {
        let a = fe(A_HEX);
        let ainv = a.invert().unwrap();
        assert_eq!(hex::encode(ainv.to_bytes()), A_INV_HEX);
        assert_eq!(&a * &ainv, FieldElement::ONE);
    }

    #[test]
    fn invert_zero_fails() {
        assert_eq!(
            FieldElement::ZERO.invert().unwrap_err(),
            CurveError::DivisionByZero
        );
    }

    #[test]
    fn divide() {
        let a = fe(A_HEX);
        let b = &a + &FieldElement::ONE;
        let quotient = b.divide(&a).unwrap();
        assert_eq!(&quotient * &a, b);
        assert_eq!(
            b.divide(&FieldElement::ZERO).unwrap_err(),
            CurveError::DivisionByZero
        );
    }

    #[test]
    fn legendre_values() {
        let a = fe(A_HEX);
        assert_eq!(a.legendre(), -1);
        assert_eq!(a.square().legendre(), 1);
        assert_eq!(FieldElement::ZERO.legendre(), 0);
        assert_eq!(FieldElement::ONE.legendre(), 1);
        // Both curve coefficients are non-squares.
        assert_eq!(crate::constants::EDWARDS_D.legendre(), -1);
        assert_eq!((-FieldElement::from_u64(5)).legendre(), -1);
    }

    #[test]
    fn sqrt_of_square() {
        let a = fe(A_HEX);
        let r = a.square().sqrt().unwrap();
        assert_eq!(hex::encode(r.to_bytes()), SQRT_A_SQUARED_HEX);
        assert_eq!(r.square(), a.square());
        // a is a non-residue, so the root of a^2 is -a here.
        assert_eq!(r, -&a);
    }

    #[test]
    fn sqrt_of_nonresidue_fails() {
        assert!(fe(A_HEX).sqrt().is_none());
        assert!(crate::constants::EDWARDS_D.sqrt().is_none());
    }

    #[test]
    fn sqrt_edge_cases() {
        assert_eq!(FieldElement::ZERO.sqrt().unwrap(), FieldElement::ZERO);
        let one = FieldElement::ONE.sqrt().unwrap();
        assert!(one == FieldElement::ONE || one == FieldElement::MINUS_ONE);
    }

    #[test]
    fn sign_convention() {
        let a = fe(A_HEX);
        assert_eq!(FieldElement::ZERO.sign(), 0);
        assert_eq!(FieldElement::ONE.sign(), 1);
        assert_eq!(FieldElement::MINUS_ONE.sign(), -1);
        assert_eq!(a.sign(), 1);
        assert_eq!((-&a).sign(), -1);
        // sign flips under negation for every nonzero element.
        assert_eq!(a.sign(), -(-&a).sign());
    }

    #[test]
    fn biguint_roundtrip() {
        let a = fe(A_HEX);
        assert_eq!(FieldElement::from_biguint(&a.to_biguint()), a);
        // Reduction of q + 5 gives 5.
        let n = &*crate::constants::BASE_FIELD_ORDER + BigUint::from(5u32);
        assert_eq!(FieldElement::from_biguint(&n), FieldElement::from_u64(5));
    }

    #[test]
    fn bigint_reduction_of_negatives() {
        let minus_five = BigInt::from(-5);
        assert_eq!(
            FieldElement::from_bigint(&minus_five),
            -FieldElement::from_u64(5)
        );
    }
}
