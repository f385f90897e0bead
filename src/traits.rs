// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Module for common traits.

// ------------------------------------------------------------------------
// Public Traits
// ------------------------------------------------------------------------

/// Trait for getting the identity element of a point type.
pub trait Identity {
    /// Returns the identity element of the curve.
    /// Can be used as a constructor.
    fn identity() -> Self;
}

/// Trait for testing if a curve point is equivalent to the identity
/// point, up to the identification of a point with its translate by the
/// affine order-2 point.  Use the `is_neutral_exact` methods to test
/// without that identification.
pub trait IsIdentity {
    /// Return true if this element is the identity element of the curve.
    fn is_identity(&self) -> bool;
}

/// Trait for checking whether a point is a rational point of the curve.
///
/// The group law keeps valid points valid, so this is mostly of use for
/// debugging and for validating deserialized data.  Not constant time.
pub trait ValidityCheck {
    /// Checks whether the point satisfies the curve equation with
    /// consistent auxiliary coordinates.
    fn is_valid(&self) -> bool;
}
