// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! Errors which may occur during field operations, point validation and
//! the wire codec.

use core::fmt;
use core::fmt::Display;

/// All distinguishable failure modes of the crate.
///
/// The taxonomy is stable and user-visible: callers match on these
/// variants to distinguish, for example, data that decodes to a point
/// outside the prime-order subgroup from data that is not a curve point
/// at all.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CurveError {
    /// Modular inversion or division was attempted on zero.
    DivisionByZero,
    /// The deserialized x-coordinate is not the x-coordinate of any
    /// rational curve point.
    XNotOnCurve,
    /// The deserialized x-coordinate belongs to a curve point outside
    /// the prime-order subgroup.
    XNotInSubgroup,
    /// The deserialized coordinate pair does not satisfy the curve
    /// equation.
    NotOnCurve,
    /// The deserialized point is on the curve but outside the
    /// prime-order subgroup.
    NotInSubgroup,
    /// The y-coordinate field of a long encoding carries the wrong
    /// sign for the format.
    WrongSignY,
    /// The leading prefix bits match neither the short nor the long
    /// encoding, or the input has the wrong length for its prefix.
    UnrecognizedFormat,
    /// An encoded field element was not the canonical representative
    /// in `[0, q)`.
    NonNormalizedDeserialization,
    /// Points at infinity have no affine coordinates and cannot be
    /// serialized.
    CannotSerializePointAtInfinity,
    /// Not-a-Point values cannot be serialized.
    CannotSerializeNaP,
}

impl Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CurveError::DivisionByZero => write!(f, "Division by zero in the base field"),
            CurveError::XNotOnCurve => {
                write!(f, "x-coordinate does not belong to any curve point")
            }
            CurveError::XNotInSubgroup => {
                write!(f, "x-coordinate belongs to a point outside the prime-order subgroup")
            }
            CurveError::NotOnCurve => write!(f, "Point does not satisfy the curve equation"),
            CurveError::NotInSubgroup => {
                write!(f, "Point is not in the prime-order subgroup")
            }
            CurveError::WrongSignY => {
                write!(f, "Encoded y-coordinate has a sign inconsistent with the format")
            }
            CurveError::UnrecognizedFormat => {
                write!(f, "Serialized point has an unrecognized format prefix")
            }
            CurveError::NonNormalizedDeserialization => {
                write!(f, "Serialized field element is not in normalized form")
            }
            CurveError::CannotSerializePointAtInfinity => {
                write!(f, "Cannot serialize a point at infinity")
            }
            CurveError::CannotSerializeNaP => write!(f, "Cannot serialize a Not-a-Point"),
        }
    }
}

impl std::error::Error for CurveError {}
