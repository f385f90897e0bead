// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Various constants: the curve coefficients, the subgroup order, the
//! example generator and the exceptional points.
//!
//! Field-valued constants live in the backend (limb encodings are
//! representation-specific) and are re-exported here; integer-valued
//! constants are exposed as lazily parsed big integers, mirroring how
//! the GLV machinery consumes them.

#![allow(non_snake_case)]

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;

pub use crate::backend::serial::u64::constants::*;

use crate::backend::serial::u64::constants as backend;

/// Parse a compile-time hex constant.  Panicking is appropriate: this
/// only ever runs on the string literals below.
fn biguint_from_hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("invalid hex constant")
}

/// The order of the base field,
/// `q = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
pub static BASE_FIELD_ORDER: LazyLock<BigUint> = LazyLock::new(|| {
    biguint_from_hex("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001")
});

/// The order of the prime-order subgroup, a 253-bit prime
/// `p = 0x1cfb69d4ca675f520cce760202687600ff8f87007419047174fd06b52876e7e1`.
pub static SUBGROUP_ORDER: LazyLock<BigInt> = LazyLock::new(|| {
    BigInt::from(biguint_from_hex(
        "1cfb69d4ca675f520cce760202687600ff8f87007419047174fd06b52876e7e1",
    ))
});

/// The cofactor of the prime-order subgroup.
pub const COFACTOR: u64 = 4;

/// The eigenvalue of the endomorphism on the prime-order subgroup:
/// \\(\psi(P) = [\lambda]P\\) with \\(\lambda^2 \equiv -2 \pmod p\\).
pub static ENDO_EIGENVALUE: LazyLock<BigInt> = LazyLock::new(|| {
    BigInt::from(biguint_from_hex(
        "13b4f3dc4a39a493edf849562b38c72bcfc49db970a5056ed13d21408783df05",
    ))
});

/// The affine point of order 2, \\(A = (0, -1)\\).  Together with the
/// prime-order subgroup it spans the "good subgroup" on which most
/// operations work modulo \\(P \equiv P + A\\).
pub const ORDER_TWO_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement::ZERO,
    Y: FieldElement::MINUS_ONE,
    Z: FieldElement::ONE,
    T: FieldElement::ZERO,
};

/// The first point at infinity, \\((\sqrt{d/a} : 0 : 1 : 0)\\) in
/// extended coordinates.  Of order 2; not in the good subgroup.
pub const INFINITY_POINT_ONE: EdwardsPoint = EdwardsPoint {
    X: backend::SQRT_D_OVER_A,
    Y: FieldElement::ZERO,
    Z: FieldElement::ZERO,
    T: FieldElement::ONE,
};

/// The second point at infinity, \\((\sqrt{d/a} : 0 : -1 : 0)\\);
/// equals [`INFINITY_POINT_ONE`] translated by [`ORDER_TWO_POINT`].
pub const INFINITY_POINT_TWO: EdwardsPoint = EdwardsPoint {
    X: backend::SQRT_D_OVER_A,
    Y: FieldElement::ZERO,
    Z: FieldElement::ZERO,
    T: FieldElement::MINUS_ONE,
};

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ValidityCheck;
    use num_bigint::BigInt;

    #[test]
    fn eigenvalue_squares_to_minus_two() {
        let p = &*SUBGROUP_ORDER;
        let lambda = &*ENDO_EIGENVALUE;
        assert_eq!((lambda * lambda) % p, p - BigInt::from(2));
    }

    #[test]
    fn generator_coordinates_are_consistent() {
        let g = GENERATOR;
        assert!(g.is_valid());
        let affine = g.to_affine();
        assert_eq!(
            hex::encode(affine.x().to_bytes()),
            "29c132cc2c0b34c5743711777bbe42f32b79c022ad998465e1e71866a252ae18"
        );
        assert_eq!(
            hex::encode(affine.y().to_bytes()),
            "2a6c669eda123e0f157d8b50badcd586358cad81eee464605e3167b6cc974166"
        );
    }

    #[test]
    fn order_two_point_is_valid() {
        assert!(ORDER_TWO_POINT.is_valid());
    }

    #[test]
    fn infinity_points_satisfy_extended_invariants() {
        // Infinite points fail the affine validity check but have
        // consistent projective coordinates: X*Y == T*Z == 0.
        for e in [INFINITY_POINT_ONE, INFINITY_POINT_TWO] {
            assert!(!e.is_valid());
            assert!(e.is_at_infinity());
            assert!(!e.is_nap());
        }
    }
}
