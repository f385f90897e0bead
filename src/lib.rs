// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Arithmetic for the **Bandersnatch** curve, a twisted Edwards curve
//! over the BLS12-381 scalar field equipped with a fast degree-2
//! endomorphism.
//!
//! This crate provides:
//!
//! * field arithmetic modulo the 255-bit base field prime, on 64-bit
//!   limbs in Montgomery form ([`field`]);
//! * curve points in extended twisted Edwards coordinates with the
//!   strongly-unified group law, an affine format for cached operands,
//!   and a double-projective format for formula outputs ([`edwards`],
//!   [`backend`]);
//! * the endomorphism \\(\psi\\) acting as multiplication by
//!   \\(\lambda\\) on the prime-order subgroup, and the exact GLV
//!   decomposition of scalars over its lattice ([`glv`]);
//! * a canonical serialization codec with short (32-byte) and long
//!   (64-byte) forms and subgroup validation ([`edwards`]);
//! * the Not-a-Point fault policy with a pluggable process-wide
//!   handler ([`nap`]).
//!
//! Constant-time execution is preferred where it is cheap (`subtle` is
//! used for selections and byte comparisons) but is **not** a contract
//! of this crate.

#![deny(missing_docs)]
#![allow(unused_qualifications)]

#[macro_use]
mod macros;

pub mod backend;
pub mod constants;
pub mod edwards;
pub mod errors;
pub mod field;
pub mod glv;
pub mod nap;
pub mod traits;

pub use crate::edwards::{
    decompress_auto, AffinePoint, CompressedEdwardsX, CompressedEdwardsXY, EdwardsPoint,
};
pub use crate::errors::CurveError;
pub use crate::field::FieldElement;
