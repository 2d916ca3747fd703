//! # Cartesian Coordinate Module
//!
//! This module provides the Cartesian representation of a coordinate: three
//! unrestricted `f64` offsets along orthogonal axes. It is the representation
//! every other one projects into for distance, equality and persistence.
//!
//! ## Internal Storage
//!
//! Coordinates are stored as three `f64` values:
//! - Values maintain full IEEE 754 double precision
//! - Any value is accepted, including NaN and infinities
//! - Non-finite components are carried through and surface as NaN distances
//!   or as arithmetic errors in the operations that cannot represent them
//!
//! ## Conversion to Spherical
//!
//! ```text
//! radius    = sqrt(x² + y² + z²)
//! latitude  = acos(z / radius)
//! longitude = atan2(y, x), shifted into [0, 2π)
//! ```
//!
//! The origin converts to the spherical origin.
//!
//! ## Examples
//!
//! ```rust
//! use locus::coordinates::cartesian::Cartesian3;
//! use locus::Coordinate;
//!
//! let point = Cartesian3::new(10.0, 20.0, -5.0);
//! let distance = point.cartesian_distance(&Cartesian3::origin()).unwrap();
//! assert!((distance - 22.9128784747792).abs() < 1e-12);
//! ```

use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::shared::{self, Coordinate};
use super::spherical::Spherical;
use crate::constants::TAU;
use crate::persistence::Record;
use crate::{CoordinateError, Result};

/// Three-dimensional Cartesian coordinate representation
///
/// Equality (`==`) is tolerant: two points are equal when their distance is
/// within [`EPSILON_DISTANCE`](crate::constants::EPSILON_DISTANCE), or, for
/// non-finite points, when their fields are identical. The relation is not
/// transitive, so `Eq` and `Hash` are not implemented; use
/// [`Cartesian3::hash_code`] where a hash of the projection is needed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component
    pub x: f64,
    /// Y-component
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian coordinate
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::coordinates::cartesian::Cartesian3;
    ///
    /// let coord = Cartesian3::new(1.0, 2.0, 3.0);
    /// assert_eq!(coord.x, 1.0);
    /// assert_eq!(coord.y, 2.0);
    /// assert_eq!(coord.z, 3.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// The origin `(0, 0, 0)`
    pub fn origin() -> Self {
        Cartesian3::new(0.0, 0.0, 0.0)
    }

    /// Calculates the magnitude (length) of the coordinate vector
    ///
    /// # Mathematical Formula
    ///
    /// `magnitude = sqrt(x² + y² + z²)`
    ///
    /// Finite components are rescaled when their squares would overflow, so
    /// the magnitude of `(1e200, 1e200, 1e200)` is finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::coordinates::cartesian::Cartesian3;
    ///
    /// let coord = Cartesian3::new(3.0, 4.0, 0.0);
    /// assert_eq!(coord.magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        shared::norm(self.x, self.y, self.z)
    }

    /// Converts to spherical coordinates
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Arithmetic`] when the result would fall
    /// outside the spherical ranges, which only happens for NaN or infinite
    /// components.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::coordinates::cartesian::Cartesian3;
    ///
    /// let spherical = Cartesian3::new(1.0, 2.0, 3.0).to_spherical().unwrap();
    /// assert!((spherical.radius() - 3.7416573867739413).abs() < 1e-7);
    /// assert!((spherical.latitude() - 0.6405223126794245).abs() < 1e-7);
    /// assert!((spherical.longitude() - 1.1071487177940904).abs() < 1e-7);
    /// ```
    pub fn to_spherical(&self) -> Result<Spherical> {
        let radius = self.magnitude();

        if radius == 0.0 {
            trace!("Converting origin {:?} to spherical origin", self);
            return Ok(Spherical::origin());
        }

        // Handle numerical precision issues
        let latitude = (self.z / radius).clamp(-1.0, 1.0).acos();
        let mut longitude = self.y.atan2(self.x);
        if longitude < 0.0 {
            longitude += TAU;
        }

        if !Spherical::is_valid_representation(radius, latitude, longitude) {
            return Err(CoordinateError::Arithmetic(format!(
                "Can not convert {:?} to spherical, result would be ({}, {}, {})",
                self, radius, latitude, longitude
            )));
        }

        Ok(Spherical::new_unchecked(radius, latitude, longitude))
    }

    /// Exact comparison of all three fields (NaN matches NaN, `0.0` does not match `-0.0`)
    pub fn fields_identical(&self, other: &Cartesian3) -> bool {
        shared::fields_identical(self, other)
    }

    /// Hash of the coordinate fields
    ///
    /// Bitwise, so two points that are `==` only within the tolerance may
    /// hash differently; see [`shared::hash_code`].
    pub fn hash_code(&self) -> u64 {
        shared::hash_code(CARTESIAN_TAG, self)
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::coordinates::cartesian::Cartesian3;
    /// use nalgebra::Vector3;
    ///
    /// let coord = Cartesian3::new(1.0, 2.0, 3.0);
    /// let vec: Vector3<f64> = coord.to_vector3();
    /// assert_eq!(vec.x, 1.0);
    /// assert_eq!(vec.y, 2.0);
    /// assert_eq!(vec.z, 3.0);
    /// ```
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

pub(crate) const CARTESIAN_TAG: u8 = 0;

impl Coordinate for Cartesian3 {
    fn to_cartesian(&self) -> Cartesian3 {
        *self
    }

    fn to_spherical(&self) -> Result<Spherical> {
        Cartesian3::to_spherical(self)
    }

    fn read_from(record: &dyn Record) -> Result<Self> {
        shared::read_cartesian(record)
    }
}

impl PartialEq for Cartesian3 {
    fn eq(&self, other: &Self) -> bool {
        shared::is_equal(self, other)
    }
}

impl From<Vector3<f64>> for Cartesian3 {
    fn from(vec: Vector3<f64>) -> Self {
        Cartesian3::from_vector3(vec)
    }
}
