// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! This module contains backend-specific constant values: the limb
//! encodings of the field modulus, the Montgomery radix, the curve
//! coefficients, the endomorphism constants, and the example generator.
//!
//! Field-valued constants are stored as Montgomery representatives;
//! exponents and moduli are plain little-endian limbs.  The canonical
//! hex value is given in each doc comment.

use crate::backend::serial::u64::field::FieldElement64;
use crate::edwards::EdwardsPoint;

/// The base field modulus
/// `q = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`
/// (the BLS12-381 scalar field prime), as plain limbs.
pub(crate) const MODULUS: [u64; 4] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// `2q`, as plain limbs.  Fits 256 bits since `q < 2^255`.
pub(crate) const MODULUS_DOUBLED: [u64; 4] = [
    0xffff_fffe_0000_0002,
    0xa77b_4805_fffc_b7fd,
    0x6673_b010_1343_b00a,
    0xe7db_4ea6_533a_fa90,
];

/// `-1/q mod 2^64`, the Montgomery reduction multiplier.
pub(crate) const NEG_INV_MODULUS: u64 = 0xffff_fffe_ffff_ffff;

/// The Montgomery radix `R = 2^256 mod q = 2^256 - 2q`, which is also
/// the Montgomery representative of one.
pub(crate) const R: [u64; 4] = [
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
];

/// `R^2 = 2^512 mod q`, used to carry decoded integers into Montgomery
/// form.
pub(crate) const R2: [u64; 4] = [
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
];

/// `-1 = q - 1`, in Montgomery form.
pub(crate) const MINUS_ONE: [u64; 4] = [
    0xffff_fffd_0000_0003,
    0xfb38_ec08_fffb_13fc,
    0x99ad_8818_1ce5_880f,
    0x5bc8_f5f9_7cd8_77d8,
];

/// `(q - 1) / 2`, as plain limbs.  The sign convention calls an element
/// negative when its canonical representative exceeds this bound.
pub(crate) const HALF_Q_MINUS_ONE: [u64; 4] = [
    0x7fff_ffff_8000_0000,
    0xa9de_d201_7fff_2dff,
    0x199c_ec04_04d0_ec02,
    0x39f6_d3a9_94ce_bea4,
];

/// `q - 2`, the Fermat inversion exponent, as plain limbs.
pub(crate) const EXP_INVERT: [u64; 4] = [
    0xffff_fffe_ffff_ffff,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// `(q - 1) / 2`, the Euler/Legendre exponent, as plain limbs.
pub(crate) const EXP_LEGENDRE: [u64; 4] = HALF_Q_MINUS_ONE;

/// The odd part `t` of `q - 1 = 2^32 * t`, as plain limbs.
pub(crate) const EXP_SQRT_T: [u64; 4] = [
    0xfffe_5bfe_ffff_ffff,
    0x09a1_d805_53bd_a402,
    0x299d_7d48_3339_d808,
    0x0000_0000_73ed_a753,
];

/// `(t + 1) / 2` for the odd part `t` above, as plain limbs.  This is
/// the initial exponent of the Tonelli-Shanks square root.
pub(crate) const EXP_SQRT_T_PLUS_ONE_HALVED: [u64; 4] = [
    0x7fff_2dff_8000_0000,
    0x04d0_ec02_a9de_d201,
    0x94ce_bea4_199c_ec04,
    0x0000_0000_39f6_d3a9,
];

/// The 2-adicity of `q - 1`.
pub(crate) const TWO_ADICITY: u32 = 32;

/// `5^t mod q` for the odd part `t` of `q - 1`: a primitive `2^32`-th
/// root of unity (5 is the smallest quadratic non-residue mod q).
/// Canonical value
/// `0x0212d79e5b416b6f0fd56dc8d168d6c0c4024ff270b3e0941b788f500b912f1f`,
/// in Montgomery form.
pub(crate) const ROOT_OF_UNITY: FieldElement64 = FieldElement64([
    0x9cab_6d5c_0c17_f47c,
    0x1ce1_e93d_fd4b_71e5,
    0x0d6d_b230_471d_d505,
    0x3f0e_e990_743a_3b6a,
]);

/// The twisted Edwards `d` coefficient
/// `0x6389c12633c267cbc66e3bf86be3b6d8cb66677177e54f92b369f2f5188d58e7`,
/// in Montgomery form.  Both `a = -5` and `d` are non-squares in GF(q).
pub const EDWARDS_D: FieldElement64 = FieldElement64([
    0xa8dc_ed1b_47a2_c730,
    0x381c_065a_ad3c_ccc7,
    0x53ff_52e1_1883_51f8,
    0x362e_8d63_990f_e940,
]);

/// The endomorphism constant
/// `b = 0x52c9f28b828426a561f00d3a63511a882ea712770d9af4d6ee0f014d172510b4`,
/// in Montgomery form.
pub(crate) const ENDO_B: FieldElement64 = FieldElement64([
    0xa250_4eaa_126f_b8e8,
    0xabee_190a_21d5_d1e5,
    0x0c3f_1183_54cb_77ef,
    0x6085_ed8a_47d4_bdae,
]);

/// The endomorphism constant
/// `c = 0x6cc624cf865457c3a97c6efd6c17d1078456abcfff36f4e9515c806cdf650b3d`,
/// in Montgomery form.
pub(crate) const ENDO_C: FieldElement64 = FieldElement64([
    0xc278_0b52_6ccb_e0c8,
    0x448f_3bf4_7388_0956,
    0x6249_f6e3_0201_4353,
    0x304c_14af_ac09_e900,
]);

/// The square root of `d/a` with positive sign,
/// `0x2123b4c7a71956a2d149cacda650bd7d2516918bf263672811f0feb1e8daef4b`,
/// in Montgomery form.  It appears in the coordinates of the two points
/// at infinity.
pub(crate) const SQRT_D_OVER_A: FieldElement64 = FieldElement64([
    0x5daf_b14f_ed90_471e,
    0x4a83_bf07_de20_5614,
    0x271b_feac_e4ff_9830,
    0x570b_fe68_b1dc_3203,
]);

/// The example generator of the prime-order subgroup given in the
/// Bandersnatch paper, with
/// `x = 0x29c132cc2c0b34c5743711777bbe42f32b79c022ad998465e1e71866a252ae18`,
/// `y = 0x2a6c669eda123e0f157d8b50badcd586358cad81eee464605e3167b6cc974166`.
pub const GENERATOR: EdwardsPoint = EdwardsPoint {
    X: FieldElement64([
        0xec26_27e1_e7ab_47f5,
        0x3e63_de48_4f01_aa9c,
        0xfe0f_5c3b_5394_6dc4,
        0x2d71_920b_aeb2_cfcd,
    ]),
    Y: FieldElement64([
        0x4e30_593e_1895_bd34,
        0x156d_738f_32af_be4b,
        0x45ef_0b1c_cdeb_75f4,
        0x6a7c_ca00_37d2_e71f,
    ]),
    Z: FieldElement64::ONE,
    T: FieldElement64([
        0x5a92_e8f6_97ad_b6b9,
        0xf138_8d46_06b1_4609,
        0x101c_7836_40a6_4516,
        0x1e9a_e707_3cc7_a9fc,
    ]),
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn r_is_one() {
        // R is the Montgomery representative of 1.
        assert_eq!(
            hex::encode(FieldElement64::ONE.to_bytes()),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn minus_one_is_q_minus_one() {
        assert_eq!(
            hex::encode(FieldElement64::MINUS_ONE.to_bytes()),
            "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000000"
        );
    }

    #[test]
    fn edwards_d_canonical_value() {
        assert_eq!(
            hex::encode(EDWARDS_D.to_bytes()),
            "6389c12633c267cbc66e3bf86be3b6d8cb66677177e54f92b369f2f5188d58e7"
        );
    }

    #[test]
    fn sqrt_d_over_a_squares_to_d_over_a() {
        // a = -5, so d/a = -d/5; check (sqrt)^2 * (-5) == d * 1.
        let lhs = &SQRT_D_OVER_A.square() * &-FieldElement64::from_u64(5);
        assert_eq!(lhs.to_bytes(), EDWARDS_D.to_bytes());
    }

    #[test]
    fn root_of_unity_has_order_two_to_the_32() {
        let mut r = ROOT_OF_UNITY;
        for _ in 0..31 {
            r = r.square();
        }
        // After 31 squarings we must be at -1, after 32 at 1.
        assert_eq!(r.to_bytes(), FieldElement64::MINUS_ONE.to_bytes());
        assert_eq!(r.square().to_bytes(), FieldElement64::ONE.to_bytes());
    }

    #[test]
    fn neg_inv_modulus() {
        assert_eq!(
            MODULUS[0].wrapping_mul(NEG_INV_MODULUS),
            u64::MAX,
        );
    }
}
