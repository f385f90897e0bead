// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! The `u64` backend: field arithmetic using four 64-bit limbs with
//! u128 products, and the constants specific to that representation.

pub mod constants;

pub mod field;
