// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Serial implementations of field and point arithmetic.

pub mod u64;

pub mod curve_models;
