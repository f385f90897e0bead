// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Pluggable implementations for different architectures.
//!
//! The backend code is separated into two levels:
//!
//! 1. a serial backend implementing the field arithmetic on 64-bit
//!    limbs with 128-bit products;
//! 2. the curve models built on top of it.
//!
//! Only the `u64` serial backend exists today; the layering leaves room
//! for a 32-bit or vectorized engine without touching the curve code.

pub mod serial;
