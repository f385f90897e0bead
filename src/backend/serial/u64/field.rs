// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Field arithmetic modulo the 255-bit BLS12-381 scalar field prime,
//! using four \\(64\\)-bit limbs in Montgomery form with \\(128\\)-bit
//! intermediate products.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::constants;

/// Compute `a + b + carry`, returning the result and the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a - (b + borrow)`, returning the result and the new borrow.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a + (b * c) + carry`, returning the result and the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// A `FieldElement64` represents an element of the field
/// \\( \mathbb Z / q\mathbb Z \\) with
/// \\( q = \\) `0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
///
/// The element \\(x\\) is stored as four 64-bit little-endian limbs holding
/// the Montgomery representative \\(W \equiv x \cdot 2^{256} \pmod q\\).
///
/// \\(W\\) is *not* kept fully reduced.  The representation invariant is
/// \\(W \le 2^{256} - q - 1\\), so that \\(W + q\\) never overflows 256 bits.
/// Since \\(2^{256} < 3q\\), each field element has at most two
/// representatives (\\(W\\) and \\(W + q\\)); equality testing and byte
/// encoding normalize first.
///
/// The `bandersnatch::field` module provides a type alias
/// `bandersnatch::field::FieldElement` to this type together with the
/// operations (inversion, square roots, the quadratic character, the sign
/// convention) that are defined in terms of the primitives here.
#[derive(Copy, Clone)]
pub struct FieldElement64(pub(crate) [u64; 4]);

impl Default for FieldElement64 {
    /// The zero element, so that zero-initialized points are the
    /// all-zero Not-a-Point sentinel.
    fn default() -> FieldElement64 {
        FieldElement64::ZERO
    }
}

impl Debug for FieldElement64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement64({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement64 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ConditionallySelectable for FieldElement64 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement64([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

/// Compute `(temp + x * y) >> 64`, storing the high 256 bits back into
/// `temp` and returning the 64 bits shifted out.
#[inline(always)]
fn mul_add_shift(temp: &mut [u64; 4], x: &[u64; 4], y: u64) -> u64 {
    let (low, carry) = mac(temp[0], x[0], y, 0);
    let (t0, carry) = mac(temp[1], x[1], y, carry);
    let (t1, carry) = mac(temp[2], x[2], y, carry);
    let (t2, t3) = mac(temp[3], x[3], y, carry);
    temp[0] = t0;
    temp[1] = t1;
    temp[2] = t2;
    temp[3] = t3;
    low
}

/// One Montgomery reduction step: `temp += floor(q * k / 2^64) + 1`.
///
/// The caller chooses `k = low * (-1/q mod 2^64) mod 2^64` for the limb
/// `low` just shifted out by [`mul_add_shift`], which makes `low + q*k`
/// divisible by `2^64`; since `low != 0` the division rounds up, whence
/// the trailing `+ 1`.
#[inline(always)]
fn montgomery_step(temp: &mut [u64; 4], k: u64) {
    let q = &constants::MODULUS;
    let (_, h0) = mac(0, q[0], k, 0);
    let (p1, h1) = mac(0, q[1], k, h0);
    let (p2, h2) = mac(0, q[2], k, h1);
    let (p3, h3) = mac(0, q[3], k, h2);

    let (t0, carry) = adc(temp[0], p1, 1);
    let (t1, carry) = adc(temp[1], p2, carry);
    let (t2, carry) = adc(temp[2], p3, carry);
    let (t3, carry) = adc(temp[3], h3, carry);
    debug_assert!(carry == 0);
    temp[0] = t0;
    temp[1] = t1;
    temp[2] = t2;
    temp[3] = t3;
}

impl<'a, 'b> Add<&'b FieldElement64> for &'a FieldElement64 {
    type Output = FieldElement64;

    fn add(self, rhs: &'b FieldElement64) -> FieldElement64 {
        let (s0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (s1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (s2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (s3, carry) = adc(self.0[3], rhs.0[3], carry);

        let mut limbs = [s0, s1, s2, s3];
        if carry != 0 {
            // The sum overflowed 2^256; subtract 2q.  Both operands are
            // at most 2^256 - q - 1, so the result stays nonnegative and
            // the subtraction must borrow against the lost 2^256.
            let m2 = &constants::MODULUS_DOUBLED;
            let (d0, borrow) = sbb(limbs[0], m2[0], 0);
            let (d1, borrow) = sbb(limbs[1], m2[1], borrow);
            let (d2, borrow) = sbb(limbs[2], m2[2], borrow);
            let (d3, borrow) = sbb(limbs[3], m2[3], borrow);
            debug_assert!(borrow != 0);
            limbs = [d0, d1, d2, d3];
        }
        FieldElement64(weak_reduce(limbs))
    }
}

impl<'a, 'b> Sub<&'b FieldElement64> for &'a FieldElement64 {
    type Output = FieldElement64;

    fn sub(self, rhs: &'b FieldElement64) -> FieldElement64 {
        let (d0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

        let mut limbs = [d0, d1, d2, d3];
        if borrow != 0 {
            // The difference went negative; add back 2q, which restores a
            // nonnegative value below 2^256 because 2q > 2^256 - q - 1.
            let m2 = &constants::MODULUS_DOUBLED;
            let (s0, carry) = adc(limbs[0], m2[0], 0);
            let (s1, carry) = adc(limbs[1], m2[1], carry);
            let (s2, carry) = adc(limbs[2], m2[2], carry);
            let (s3, carry) = adc(limbs[3], m2[3], carry);
            debug_assert!(carry == 1);
            limbs = [s0, s1, s2, s3];
        }
        FieldElement64(weak_reduce(limbs))
    }
}

impl<'a, 'b> Mul<&'b FieldElement64> for &'a FieldElement64 {
    type Output = FieldElement64;

    fn mul(self, rhs: &'b FieldElement64) -> FieldElement64 {
        // Montgomery CIOS: interleave adding x * y[i] with division by
        // 2^64 modulo q.  With B = 2^256 - q - 1 and both inputs at most
        // B, the accumulator never exceeds B + q = 2^256 - 1, so four
        // limbs suffice throughout and a single conditional subtraction
        // of q at the end restores the representation invariant.
        let mut temp = [0u64; 4];
        for i in 0..4 {
            let low = mul_add_shift(&mut temp, &self.0, rhs.0[i]);
            if low != 0 {
                let k = low.wrapping_mul(constants::NEG_INV_MODULUS);
                montgomery_step(&mut temp, k);
            }
        }
        FieldElement64(weak_reduce(temp))
    }
}

define_add_variants!(
    LHS = FieldElement64,
    RHS = FieldElement64,
    Output = FieldElement64
);
define_sub_variants!(
    LHS = FieldElement64,
    RHS = FieldElement64,
    Output = FieldElement64
);
define_mul_variants!(
    LHS = FieldElement64,
    RHS = FieldElement64,
    Output = FieldElement64
);

impl<'b> AddAssign<&'b FieldElement64> for FieldElement64 {
    fn add_assign(&mut self, rhs: &'b FieldElement64) {
        *self = &*self + rhs;
    }
}

impl<'b> SubAssign<&'b FieldElement64> for FieldElement64 {
    fn sub_assign(&mut self, rhs: &'b FieldElement64) {
        *self = &*self - rhs;
    }
}

impl<'b> MulAssign<&'b FieldElement64> for FieldElement64 {
    fn mul_assign(&mut self, rhs: &'b FieldElement64) {
        *self = &*self * rhs;
    }
}

define_add_assign_variants!(LHS = FieldElement64, RHS = FieldElement64);
define_sub_assign_variants!(LHS = FieldElement64, RHS = FieldElement64);
define_mul_assign_variants!(LHS = FieldElement64, RHS = FieldElement64);

impl<'a> Neg for &'a FieldElement64 {
    type Output = FieldElement64;

    fn neg(self) -> FieldElement64 {
        &FieldElement64::ZERO - self
    }
}

impl Neg for FieldElement64 {
    type Output = FieldElement64;

    fn neg(self) -> FieldElement64 {
        -&self
    }
}

/// Subtract q once when the top limb exceeds q's top limb.
///
/// This keeps the stored value at most `2^256 - q - 1` without forcing a
/// canonical representative.
#[inline(always)]
fn weak_reduce(mut limbs: [u64; 4]) -> [u64; 4] {
    let q = &constants::MODULUS;
    if limbs[3] > q[3] {
        let (d0, borrow) = sbb(limbs[0], q[0], 0);
        let (d1, borrow) = sbb(limbs[1], q[1], borrow);
        let (d2, borrow) = sbb(limbs[2], q[2], borrow);
        let (d3, borrow) = sbb(limbs[3], q[3], borrow);
        debug_assert!(borrow == 0);
        limbs = [d0, d1, d2, d3];
    }
    limbs
}

/// Subtract q when the value is at least q, producing the canonical
/// representative in `[0, q)`.  Callers must uphold the representation
/// invariant, so at most one subtraction is ever needed.
#[inline]
fn strong_reduce(limbs: [u64; 4]) -> [u64; 4] {
    let q = &constants::MODULUS;
    let (d0, borrow) = sbb(limbs[0], q[0], 0);
    let (d1, borrow) = sbb(limbs[1], q[1], borrow);
    let (d2, borrow) = sbb(limbs[2], q[2], borrow);
    let (d3, borrow) = sbb(limbs[3], q[3], borrow);
    if borrow == 0 {
        [d0, d1, d2, d3]
    } else {
        limbs
    }
}

impl FieldElement64 {
    /// The zero element.
    pub const ZERO: FieldElement64 = FieldElement64([0, 0, 0, 0]);

    /// The multiplicative identity, i.e. the Montgomery representative
    /// \\(2^{256} \bmod q = 2^{256} - 2q\\).
    pub const ONE: FieldElement64 = FieldElement64(constants::R);

    /// The element \\(-1 = q - 1\\), in Montgomery form.
    pub const MINUS_ONE: FieldElement64 = FieldElement64(constants::MINUS_ONE);

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement64 {
        self * self
    }

    /// Compute `2 * self`.
    pub fn double(&self) -> FieldElement64 {
        self + self
    }

    /// Compute `5 * self` by two doublings and an addition, avoiding a
    /// full multiplication.  Five is `-a` for the curve coefficient
    /// `a = -5`, so this shows up on every group-law evaluation.
    pub fn times_five(&self) -> FieldElement64 {
        &self.double().double() + self
    }

    /// Raise this element to the power given by four little-endian
    /// 64-bit limbs.  Runs in time variable in the exponent, which is
    /// fine for the fixed public exponents this crate uses.
    pub fn pow_vartime(&self, exp: &[u64; 4]) -> FieldElement64 {
        let mut res = FieldElement64::ONE;
        for limb in exp.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((limb >> i) & 1) == 1 {
                    res = &res * self;
                }
            }
        }
        res
    }

    /// Return the canonical (fully reduced, non-Montgomery) limbs of
    /// this element.
    pub(crate) fn canonical_limbs(&self) -> [u64; 4] {
        // Dividing the Montgomery representative by 2^256 is the CIOS
        // loop run against the multiplier 1.
        let mut temp = self.0;
        for _ in 0..4 {
            let low = temp[0];
            temp = [temp[1], temp[2], temp[3], 0];
            if low != 0 {
                let k = low.wrapping_mul(constants::NEG_INV_MODULUS);
                montgomery_step(&mut temp, k);
            }
        }
        strong_reduce(temp)
    }

    /// Encode this element as 32 big-endian bytes of its canonical
    /// representative.
    pub fn to_bytes(&self) -> [u8; 32] {
        let limbs = self.canonical_limbs();
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[8 * i..8 * i + 8].copy_from_slice(&limbs[3 - i].to_be_bytes());
        }
        bytes
    }

    /// Decode 32 big-endian bytes into a field element, reducing modulo
    /// q.  The returned `Choice` is set when the input was already the
    /// canonical representative (i.e. in `[0, q)`).
    pub fn from_bytes(bytes: &[u8; 32]) -> (FieldElement64, Choice) {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&bytes[8 * i..8 * i + 8]);
            limbs[3 - i] = u64::from_be_bytes(chunk);
        }

        let q = &constants::MODULUS;
        let (_, borrow) = sbb(limbs[0], q[0], 0);
        let (_, borrow) = sbb(limbs[1], q[1], borrow);
        let (_, borrow) = sbb(limbs[2], q[2], borrow);
        let (_, borrow) = sbb(limbs[3], q[3], borrow);
        let was_canonical = Choice::from((borrow >> 63) as u8);

        // 2^256 < 3q, so at most two subtractions reach [0, q).
        limbs = strong_reduce(strong_reduce(limbs));

        // Carry into Montgomery form: (x * R^2) / R = x * R.
        let fe = &FieldElement64(limbs) * &FieldElement64(constants::R2);
        (fe, was_canonical)
    }

    /// Construct a field element from a small integer.
    pub fn from_u64(n: u64) -> FieldElement64 {
        &FieldElement64([n, 0, 0, 0]) * &FieldElement64(constants::R2)
    }

    /// Canonicalize the stored representative in place, so that the
    /// limbs of equal elements compare equal.  Arithmetic never needs
    /// this; byte encoding normalizes on the fly.
    pub fn normalize(&mut self) {
        self.0 = strong_reduce(self.0);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fe(hex_str: &str) -> FieldElement64 {
        let bytes: [u8; 32] = hex::decode(hex_str).unwrap().try_into().unwrap();
        let (fe, canonical) = FieldElement64::from_bytes(&bytes);
        assert!(bool::from(canonical));
        fe
    }

    /// A fixed element a, with known products and powers computed with
    /// an independent bignum implementation.
    const A_HEX: &str = "123456789abcdef0fedcba9876543210deadbeefcafebabe0123456789abcdef";
    const B_HEX: &str = "2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a";
    const A_PLUS_B_HEX: &str = "3c5e80a2c4e7091b2906e4c2a07e5c3b08d7e919f528e4e82b4d6f91b3d5f819";
    const A_MINUS_B_HEX: &str = "5bf7d3a19a30320f07ec687655cbdfec084138c8a0d2ec92d6f91b3c5f81a3c6";
    const A_MUL_B_HEX: &str = "557b1ca128d15fa9672f77f6a808af95407c3c42062b4a258340bbc741e9f57d";
    const A_SQUARED_HEX: &str = "338db7da59f782c7cf4bfb1812aadc31564ffd72bd361fe88a387c494abca53c";

    #[test]
    fn a_plus_b() {
        let r = &fe(A_HEX) + &fe(B_HEX);
        assert_eq!(hex::encode(r.to_bytes()), A_PLUS_B_HEX);
    }

    #[test]
    fn a_minus_b() {
        let r = &fe(A_HEX) - &fe(B_HEX);
        assert_eq!(hex::encode(r.to_bytes()), A_MINUS_B_HEX);
    }

    #[test]
    fn b_minus_a_is_neg_of_a_minus_b() {
        let r = &fe(B_HEX) - &fe(A_HEX);
        let s = -&(&fe(A_HEX) - &fe(B_HEX));
        assert_eq!(r.to_bytes(), s.to_bytes());
    }

    #[test]
    fn a_mul_b() {
        let r = &fe(A_HEX) * &fe(B_HEX);
        assert_eq!(hex::encode(r.to_bytes()), A_MUL_B_HEX);
    }

    #[test]
    fn a_square_vs_a_mul_a() {
        let a = fe(A_HEX);
        assert_eq!(hex::encode(a.square().to_bytes()), A_SQUARED_HEX);
        assert_eq!(a.square().to_bytes(), (&a * &a).to_bytes());
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let a = fe(A_HEX);
        assert_eq!((&a * &FieldElement64::ONE).to_bytes(), a.to_bytes());
        assert_eq!(hex::encode(FieldElement64::ONE.to_bytes()), format!("{:064x}", 1));
    }

    #[test]
    fn times_five_matches_mul() {
        let a = fe(A_HEX);
        let five = FieldElement64::from_u64(5);
        assert_eq!(a.times_five().to_bytes(), (&a * &five).to_bytes());
    }

    #[test]
    fn minus_one_times_minus_one() {
        let r = &FieldElement64::MINUS_ONE * &FieldElement64::MINUS_ONE;
        assert_eq!(r.to_bytes(), FieldElement64::ONE.to_bytes());
    }

    #[test]
    fn non_canonical_input_reduces() {
        // q + 1 must decode to 1 and be flagged non-canonical.
        let q_plus_one: [u8; 32] =
            hex::decode("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000002")
                .unwrap()
                .try_into()
                .unwrap();
        let (r, canonical) = FieldElement64::from_bytes(&q_plus_one);
        assert!(!bool::from(canonical));
        assert_eq!(r.to_bytes(), FieldElement64::ONE.to_bytes());
    }

    #[test]
    fn representation_non_uniqueness_is_invisible() {
        // W and W + q encode the same field element; addition of zero in
        // a non-canonical representative must not change the value.
        let a = fe(A_HEX);
        let q_as_element = FieldElement64(constants::MODULUS);
        // The limbs of q are a second representative of zero.
        assert_eq!(q_as_element.to_bytes(), FieldElement64::ZERO.to_bytes());
        let b = &a + &q_as_element;
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn normalize_canonicalizes_limbs() {
        let mut zero_rep = FieldElement64(constants::MODULUS);
        zero_rep.normalize();
        assert_eq!(zero_rep.0, [0u64; 4]);
        let mut one = FieldElement64::ONE;
        one.normalize();
        assert_eq!(one.0, FieldElement64::ONE.0);
    }

    #[test]
    fn pow_vartime_small() {
        let a = fe(A_HEX);
        let cube = a.pow_vartime(&[3, 0, 0, 0]);
        assert_eq!(cube.to_bytes(), (&a.square() * &a).to_bytes());
    }

    #[test]
    fn from_u64_roundtrip() {
        let n = FieldElement64::from_u64(0xdead_beef);
        assert_eq!(hex::encode(n.to_bytes()), format!("{:064x}", 0xdead_beefu64));
    }
}
