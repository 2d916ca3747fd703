//! # Coordinate capability and shared algorithms
//!
//! [`Coordinate`] is the contract every representation satisfies. A
//! representation only has to supply its two conversions,
//! [`Coordinate::to_cartesian`] and [`Coordinate::to_spherical`]; distance,
//! central angle, tolerant equality and persistence are provided on top of
//! them by the free functions in this module.
//!
//! ## Numerical consistency checks
//!
//! The distance is recomputed with swapped operands while debug assertions are
//! enabled. The same check is available in every build through
//! [`verify_distance_symmetry`], which reports a mismatch as
//! [`CoordinateError::IllegalState`].

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::Hasher;

use log::{debug, trace};

use super::cartesian::Cartesian3;
use super::spherical::Spherical;
use crate::constants::{EPSILON_DISTANCE, X_COLUMN, Y_COLUMN, Z_COLUMN};
use crate::persistence::Record;
use crate::{CoordinateError, Result};

/// A point in 3-D space, independent of how it is represented
///
/// Implementations must be immutable: every operation returns freshly
/// computed values and never modifies `self`.
pub trait Coordinate: fmt::Debug {
    /// Cartesian projection of this coordinate
    fn to_cartesian(&self) -> Cartesian3;

    /// Spherical projection of this coordinate
    ///
    /// Fails with [`CoordinateError::Arithmetic`] when the conversion would
    /// produce values outside the spherical ranges.
    fn to_spherical(&self) -> Result<Spherical>;

    /// Euclidean distance between the Cartesian projections of both coordinates
    fn cartesian_distance(&self, other: &dyn Coordinate) -> Result<f64> {
        cartesian_distance(self, other)
    }

    /// Great-circle angle between both coordinates, in radians
    fn central_angle(&self, other: &dyn Coordinate) -> Result<f64> {
        central_angle(self, other)
    }

    /// Tolerant equality across representations; never fails
    fn is_equal(&self, other: &dyn Coordinate) -> bool {
        is_equal(self, other)
    }

    /// Write the Cartesian projection into the coordinate columns of `record`
    fn write_on(&self, record: &mut dyn Record) -> Result<()> {
        write_cartesian(record, &self.to_cartesian())
    }

    /// Read a coordinate of this representation from `record`
    fn read_from(record: &dyn Record) -> Result<Self>
    where
        Self: Sized;
}

/// Raw Euclidean distance between two Cartesian points, with no validation
pub fn euclidean_distance(first: &Cartesian3, second: &Cartesian3) -> f64 {
    norm(
        first.x - second.x,
        first.y - second.y,
        first.z - second.z,
    )
}

/// Length of the vector `(x, y, z)`
///
/// Finite components whose squares overflow are rescaled by the largest
/// absolute component, so the result is only infinite when the true length
/// is not representable.
pub(crate) fn norm(x: f64, y: f64, z: f64) -> f64 {
    let plain = (x * x + y * y + z * z).sqrt();
    if plain.is_finite() || !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return plain;
    }

    let scale = x.abs().max(y.abs()).max(z.abs());
    let (x, y, z) = (x / scale, y / scale, z / scale);
    scale * (x * x + y * y + z * z).sqrt()
}

/// Distance between two coordinates of any representation
///
/// A NaN distance (from NaN fields, or from subtracting equal infinities) is
/// returned as is. Negative or infinite results are rejected.
pub fn cartesian_distance<A, B>(first: &A, second: &B) -> Result<f64>
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    let first = first.to_cartesian();
    let second = second.to_cartesian();
    let distance = euclidean_distance(&first, &second);

    debug_assert!(
        same_result(distance, euclidean_distance(&second, &first)),
        "distance between {:?} and {:?} is not symmetric",
        first,
        second
    );

    if distance < 0.0 || distance.is_infinite() {
        return Err(CoordinateError::Arithmetic(format!(
            "Can not calculate distance between {:?} and {:?}, result would be {}",
            first, second, distance
        )));
    }

    Ok(distance)
}

/// Recompute the distance with swapped operands and require identical results
///
/// Returns the distance on success. A mismatch means the floating-point
/// library is inconsistent and is reported as [`CoordinateError::IllegalState`].
pub fn verify_distance_symmetry<A, B>(first: &A, second: &B) -> Result<f64>
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    let first = first.to_cartesian();
    let second = second.to_cartesian();
    let forward = euclidean_distance(&first, &second);
    let backward = euclidean_distance(&second, &first);

    if same_result(forward, backward) {
        Ok(forward)
    } else {
        Err(CoordinateError::IllegalState(format!(
            "Distance is not symmetric: {} vs {}",
            forward, backward
        )))
    }
}

/// Central angle computed on the spherical projection of `first`
pub fn central_angle<A>(first: &A, second: &dyn Coordinate) -> Result<f64>
where
    A: Coordinate + ?Sized,
{
    first.to_spherical()?.central_angle(second)
}

/// Tolerant equality across representations
///
/// The coordinates are equal if their finite distance is within
/// [`EPSILON_DISTANCE`]. A non-finite distance falls back to comparing the
/// Cartesian fields exactly, so a coordinate holding NaN still equals itself.
pub fn is_equal<A, B>(first: &A, second: &B) -> bool
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    let first = first.to_cartesian();
    let second = second.to_cartesian();
    let distance = euclidean_distance(&first, &second);

    if distance.is_finite() {
        distance.abs() <= EPSILON_DISTANCE
    } else {
        debug!(
            "Distance between {:?} and {:?} is {}, comparing fields exactly",
            first, second, distance
        );
        fields_identical(&first, &second)
    }
}

/// Exact field comparison under IEEE total ordering (NaN matches NaN)
pub fn fields_identical(first: &Cartesian3, second: &Cartesian3) -> bool {
    first.x.total_cmp(&second.x) == Ordering::Equal
        && first.y.total_cmp(&second.y) == Ordering::Equal
        && first.z.total_cmp(&second.z) == Ordering::Equal
}

/// Hash of a Cartesian projection, salted with a representation tag
///
/// The hash covers the exact bit patterns of the projection. Values with
/// identical projections hash identically, but values that are only equal
/// within [`EPSILON_DISTANCE`] (such as `(0, 0, 0)` and `(0, 0, 1e-5)`) will
/// usually hash differently: no hash can agree with a non-transitive
/// tolerance.
pub fn hash_code(tag: u8, cartesian: &Cartesian3) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write_u8(tag);
    hasher.write_u64(cartesian.x.to_bits());
    hasher.write_u64(cartesian.y.to_bits());
    hasher.write_u64(cartesian.z.to_bits());
    hasher.finish()
}

/// Read the three coordinate columns into a Cartesian point
pub fn read_cartesian(record: &dyn Record) -> Result<Cartesian3> {
    let x = record.get_f64(X_COLUMN)?;
    let y = record.get_f64(Y_COLUMN)?;
    let z = record.get_f64(Z_COLUMN)?;
    trace!("Read coordinate ({}, {}, {}) from record", x, y, z);
    Ok(Cartesian3::new(x, y, z))
}

/// Write a Cartesian point into the three coordinate columns
pub fn write_cartesian(record: &mut dyn Record, cartesian: &Cartesian3) -> Result<()> {
    record.set_f64(X_COLUMN, cartesian.x)?;
    record.set_f64(Y_COLUMN, cartesian.y)?;
    record.set_f64(Z_COLUMN, cartesian.z)?;
    trace!("Wrote coordinate {:?} to record", cartesian);
    Ok(())
}

fn same_result(first: f64, second: f64) -> bool {
    first.to_bits() == second.to_bits() || (first.is_nan() && second.is_nan())
}
