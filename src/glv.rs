// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! GLV lattice decomposition.
//!
//! Consider the lattice \\(L = \\{(u, v) \in \mathbb Z^2 : u + v\lambda
//! \equiv 0 \pmod p\\}\\), where \\(\lambda\\) is the eigenvalue of the
//! endomorphism \\(\psi\\) on the prime-order subgroup.  For any
//! \\((u, v)\\) with \\((u, v) - (t, 0) \in L\\) and any subgroup point
//! \\(P\\),
//! \\[ [t]P = [u]P + [v]\psi(P), \\]
//! so finding a decomposition with small \\(\max(|u|, |v|)\\) roughly
//! halves the length of the scalar recoding in an exponentiation.
//! Finding the best \\((u, v)\\) is a closest-vector problem for
//! \\(L\\) with target \\((t, 0)\\), which in dimension 2 we can
//! afford to solve exactly.
//!
//! The fixed LLL-reduced basis below (computed with SAGE) satisfies
//! \\(b_{11} = b_{22}\\) and \\(b_{21} = -2 b_{12}\\): for \\((u, v)
//! \in L\\), multiplying \\(u + v\lambda \equiv 0\\) by \\(\lambda\\)
//! gives \\(\lambda u - 2v \equiv 0\\), so \\((-2v, u)\\) is in
//! \\(L\\) too and is short whenever \\((u, v)\\) is.

use std::sync::LazyLock;

use num_bigint::BigInt;
use num_traits::Signed;

use crate::constants;

/// Parse a compile-time decimal constant.
fn bigint_from_dec(s: &str) -> BigInt {
    BigInt::parse_bytes(s.as_bytes(), 10).expect("invalid decimal constant")
}

/// First basis vector, first component.
static LATTICE_B11: LazyLock<BigInt> =
    LazyLock::new(|| bigint_from_dec("113482231691339203864511368254957623327"));

/// First basis vector, second component.
static LATTICE_B12: LazyLock<BigInt> =
    LazyLock::new(|| bigint_from_dec("10741319382058138887739339959866629956"));

/// Second basis vector, first component; equals `-2 * LATTICE_B12`.
static LATTICE_B21: LazyLock<BigInt> =
    LazyLock::new(|| bigint_from_dec("-21482638764116277775478679919733259912"));

/// Second basis vector, second component; equals `LATTICE_B11`.
static LATTICE_B22: LazyLock<BigInt> =
    LazyLock::new(|| bigint_from_dec("113482231691339203864511368254957623327"));

/// `(p - 1) / 2`: representing `Z/p` by `-half..=half` turns rounding
/// to the nearest lattice multiple into a plain `mod p`.
static HALF_SUBGROUP_ORDER: LazyLock<BigInt> =
    LazyLock::new(|| (&*constants::SUBGROUP_ORDER - BigInt::from(1)) / BigInt::from(2));

/// The representative of `n mod p` in `[0, p)`.
fn pos_mod(n: &BigInt, p: &BigInt) -> BigInt {
    let r = n % p;
    if r.is_negative() {
        r + p
    } else {
        r
    }
}

/// The infinity norm `max(|u|, |v|)`.
fn infinity_norm(u: &BigInt, v: &BigInt) -> BigInt {
    let ua = u.magnitude();
    let va = v.magnitude();
    BigInt::from(if ua > va { ua.clone() } else { va.clone() })
}

/// Decompose a scalar `t` into `(u, v)` with `u + v*lambda == t (mod p)`
/// and minimal `max(|u|, |v|)`.
///
/// The first step is Babai rounding: write \\((t, 0) = \alpha b_1 +
/// \beta b_2\\) over the reals and round \\(\alpha, \beta\\) to the
/// nearest integers.  Multiplying through by \\(\det B = p\\) turns the
/// fractional parts into the centered residues
/// \\(\delta_\alpha = p(\alpha - \lfloor\alpha\rceil)\\) and
/// \\(\delta_\beta\\), so the whole computation stays in integers.
///
/// Babai rounding alone is only near-optimal: the fundamental cell of
/// the basis is not contained in the Voronoi cell around the origin,
/// but it *is* contained in the union of the Voronoi cells around
/// \\(0, \pm b_1, \pm b_2\\).  So the exact optimum is found among the
/// initial result and four correction candidates, all measured from the
/// *initial* pair; updating greedily could leave a local optimum
/// standing.
pub fn decompose(t: &BigInt) -> (BigInt, BigInt) {
    let p = &*constants::SUBGROUP_ORDER;
    let half = &*HALF_SUBGROUP_ORDER;
    let b11 = &*LATTICE_B11;
    let b12 = &*LATTICE_B12;
    let b21 = &*LATTICE_B21;
    let b22 = &*LATTICE_B22;

    // Components of (t, 0) * adj(B), shifted by half so that the mod
    // operation rounds to the nearest multiple instead of truncating,
    // then shifted back to the centered range -half..=half.
    let delta_alpha = pos_mod(&(t * b22 + half), p) - half;
    let delta_beta = pos_mod(&(half - t * b12), p) - half;

    // Multiply by B / det(B); both divisions are exact.
    let u = (b11 * &delta_alpha + b21 * &delta_beta) / p;
    let v = (b12 * &delta_alpha + b22 * &delta_beta) / p;

    let mut best_u = u.clone();
    let mut best_v = v.clone();
    let mut best_norm = infinity_norm(&u, &v);

    let candidates = [
        if u.is_positive() {
            (&u - b11, &v - b12)
        } else {
            (&u + b11, &v + b12)
        },
        if v.is_positive() {
            (&u - b21, &v - b22)
        } else {
            (&u + b21, &v + b22)
        },
    ];
    for (cu, cv) in candidates {
        let norm = infinity_norm(&cu, &cv);
        if norm < best_norm {
            best_u = cu;
            best_v = cv;
            best_norm = norm;
        }
    }
    (best_u, best_v)
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::BigUint;

    fn congruent(t: &BigInt, u: &BigInt, v: &BigInt) -> bool {
        let p = &*constants::SUBGROUP_ORDER;
        let lambda = &*constants::ENDO_EIGENVALUE;
        pos_mod(&(u + v * lambda - t), p) == BigInt::from(0)
    }

    /// Check optimality against the six Voronoi-relevant vectors
    /// `±b1, ±b2, ±(b1 + b2)`.
    fn is_optimal(u: &BigInt, v: &BigInt) -> bool {
        let b11 = &*LATTICE_B11;
        let b12 = &*LATTICE_B12;
        let b21 = &*LATTICE_B21;
        let b22 = &*LATTICE_B22;
        let norm = infinity_norm(u, v);
        let relevant = [
            (b11.clone(), b12.clone()),
            (b21.clone(), b22.clone()),
            (b11 + b21, b12 + b22),
        ];
        for (du, dv) in relevant {
            for sign in [1i32, -1] {
                let alt_u = u + &du * BigInt::from(sign);
                let alt_v = v + &dv * BigInt::from(sign);
                if infinity_norm(&alt_u, &alt_v) < norm {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn basis_is_in_the_lattice() {
        let p = &*constants::SUBGROUP_ORDER;
        let lambda = &*constants::ENDO_EIGENVALUE;
        assert_eq!(
            pos_mod(&(&*LATTICE_B11 + &*LATTICE_B12 * lambda), p),
            BigInt::from(0)
        );
        assert_eq!(
            pos_mod(&(&*LATTICE_B21 + &*LATTICE_B22 * lambda), p),
            BigInt::from(0)
        );
        // The structural identities from lambda^2 == -2.
        assert_eq!(*LATTICE_B22, *LATTICE_B11);
        assert_eq!(*LATTICE_B21, &*LATTICE_B12 * BigInt::from(-2));
    }

    #[test]
    fn unit_decompositions() {
        let (u, v) = decompose(&BigInt::from(1));
        assert_eq!((u, v), (BigInt::from(1), BigInt::from(0)));

        let (u, v) = decompose(&constants::ENDO_EIGENVALUE);
        assert_eq!((u, v), (BigInt::from(0), BigInt::from(1)));

        let (u, v) = decompose(&BigInt::from(0));
        assert_eq!((u, v), (BigInt::from(0), BigInt::from(0)));
    }

    #[test]
    fn sample_decomposition() {
        let t = BigInt::from(
            BigUint::parse_bytes(
                b"1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
                16,
            )
            .unwrap(),
        ) % &*constants::SUBGROUP_ORDER;
        let (u, v) = decompose(&t);
        assert_eq!(
            u,
            bigint_from_dec("-36836256148170317204152724904743470830")
        );
        assert_eq!(
            v,
            bigint_from_dec("-48725087478385704135505686928111415239")
        );
        assert!(congruent(&t, &u, &v));
        assert!(is_optimal(&u, &v));
    }

    #[test]
    fn decompositions_are_congruent_and_optimal() {
        // A deterministic sweep over scalars with varied bit patterns.
        let p = &*constants::SUBGROUP_ORDER;
        let mut t = BigInt::from(0xdead_beefu64);
        for _ in 0..32 {
            t = pos_mod(&(&t * &t + BigInt::from(1)), p);
            let (u, v) = decompose(&t);
            assert!(congruent(&t, &u, &v));
            assert!(is_optimal(&u, &v));
            // Both components fit in half-size integers.
            assert!(u.magnitude().bits() <= 128);
            assert!(v.magnitude().bits() <= 128);
        }
    }

    #[test]
    fn decomposition_drives_scalar_multiplication() {
        use crate::constants::GENERATOR;
        // [t]P == [u]P + [v]psi(P) on the subgroup.
        let t = bigint_from_dec("987654321987654321987654321987654321987654321");
        let (u, v) = decompose(&t);
        let direct = GENERATOR.mul_bigint_vartime(&t);
        let via_endo = &GENERATOR.mul_bigint_vartime(&u)
            + &GENERATOR.endo().mul_bigint_vartime(&v);
        assert!(direct.is_equal_exact(&via_endo));
    }
}
