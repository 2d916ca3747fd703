//! Spherical coordinates: radius, latitude and longitude
//!
//! Latitude is the polar angle measured from the positive z-axis and
//! longitude the azimuth in the x-y plane. Both are used in radians by every
//! trigonometric operation, while construction only checks the numeric
//! bounds `[0, 180)` and `[0, 360)`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::cartesian::Cartesian3;
use super::shared::{self, Coordinate};
use crate::constants::{
    EPSILON_DISTANCE, LATITUDE_UPPER_LIMIT, LONGITUDE_UPPER_LIMIT, MAX_CENTRAL_ANGLE,
    MIN_LATITUDE, MIN_LONGITUDE, MIN_RADIUS,
};
use crate::persistence::Record;
use crate::{CoordinateError, Result};

pub(crate) const SPHERICAL_TAG: u8 = 1;

/// Validated spherical coordinate
///
/// Values can only be created through [`Spherical::new`] (or conversions that
/// apply the same checks), so every instance satisfies
/// `radius >= 0`, `0 <= latitude < 180` and `0 <= longitude < 360`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "SphericalFields")]
pub struct Spherical {
    radius: f64,
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form used during deserialization
#[derive(Deserialize)]
struct SphericalFields {
    radius: f64,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<SphericalFields> for Spherical {
    type Error = CoordinateError;

    fn try_from(fields: SphericalFields) -> Result<Self> {
        Spherical::new(fields.radius, fields.latitude, fields.longitude)
    }
}

impl Spherical {
    /// Create a spherical coordinate, checking every field against its range
    ///
    /// # Errors
    ///
    /// [`CoordinateError::InvalidArgument`] if the radius is negative, or the
    /// latitude or longitude lies outside `[0, 180)` / `[0, 360)`. NaN is
    /// outside every range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::Spherical;
    ///
    /// assert!(Spherical::new(5.0, 0.5, 1.0).is_ok());
    /// assert!(Spherical::new(-1.0, 0.5, 1.0).is_err());
    /// assert!(Spherical::new(5.0, 180.0, 1.0).is_err());
    /// ```
    pub fn new(radius: f64, latitude: f64, longitude: f64) -> Result<Self> {
        if radius.is_nan() || radius < MIN_RADIUS {
            return Err(CoordinateError::InvalidArgument(format!(
                "Radius can not be negative, got {}",
                radius
            )));
        }
        if !(MIN_LATITUDE..LATITUDE_UPPER_LIMIT).contains(&latitude) {
            return Err(CoordinateError::InvalidArgument(format!(
                "Latitude must be in range [{},{}), got {}",
                MIN_LATITUDE, LATITUDE_UPPER_LIMIT, latitude
            )));
        }
        if !(MIN_LONGITUDE..LONGITUDE_UPPER_LIMIT).contains(&longitude) {
            return Err(CoordinateError::InvalidArgument(format!(
                "Longitude must be in range [{},{}), got {}",
                MIN_LONGITUDE, LONGITUDE_UPPER_LIMIT, longitude
            )));
        }

        Ok(Self::new_unchecked(radius, latitude, longitude))
    }

    /// Callers must have checked [`Spherical::is_valid_representation`]
    pub(crate) fn new_unchecked(radius: f64, latitude: f64, longitude: f64) -> Self {
        Spherical {
            radius,
            latitude,
            longitude,
        }
    }

    /// The origin `(0, 0, 0)`
    pub fn origin() -> Self {
        Self::new_unchecked(0.0, 0.0, 0.0)
    }

    /// Check whether the three values would form a valid spherical coordinate
    pub fn is_valid_representation(radius: f64, latitude: f64, longitude: f64) -> bool {
        radius >= MIN_RADIUS
            && (MIN_LATITUDE..LATITUDE_UPPER_LIMIT).contains(&latitude)
            && (MIN_LONGITUDE..LONGITUDE_UPPER_LIMIT).contains(&longitude)
    }

    /// Distance from the origin
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Polar angle in radians
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Azimuth in radians
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Cartesian projection
    ///
    /// - `x = radius * sin(latitude) * cos(longitude)`
    /// - `y = radius * sin(latitude) * sin(longitude)`
    /// - `z = radius * cos(latitude)`
    pub fn to_cartesian(&self) -> Cartesian3 {
        project(self.radius, self.latitude, self.longitude)
    }

    /// Cartesian projection, checked against the projection of the mirrored
    /// point with half the radius
    ///
    /// The mirrored point `(radius / 2, 180 - latitude, 360 - longitude)` must
    /// lie at exactly half the distance from the origin. A mismatch beyond
    /// [`EPSILON_DISTANCE`] (relative) points at an overflow or an
    /// inconsistent math library and is reported as
    /// [`CoordinateError::IllegalState`].
    pub fn verify_projection(&self) -> Result<Cartesian3> {
        let projection = self.to_cartesian();
        let mirrored = project(
            self.radius / 2.0,
            LATITUDE_UPPER_LIMIT - self.latitude,
            LONGITUDE_UPPER_LIMIT - self.longitude,
        );

        let full = projection.magnitude();
        let doubled_half = 2.0 * mirrored.magnitude();

        let consistent = if full.is_finite() && doubled_half.is_finite() {
            (full - doubled_half).abs() <= EPSILON_DISTANCE * full.max(1.0)
        } else {
            full.total_cmp(&doubled_half) == Ordering::Equal
        };

        if consistent {
            Ok(projection)
        } else {
            Err(CoordinateError::IllegalState(format!(
                "Projection of {:?} has length {}, mirrored projection implies {}",
                self, full, doubled_half
            )))
        }
    }

    /// Recompute the central angle with swapped operands and require an
    /// identical result
    pub fn verify_angle_symmetry(&self, other: &Spherical) -> Result<f64> {
        let angle = great_circle_angle(self, other);
        let swapped = great_circle_angle(other, self);

        if angle.to_bits() != swapped.to_bits() {
            return Err(CoordinateError::Arithmetic(format!(
                "Can not calculate central angle due to arithmetic limitations: {} vs {}",
                angle, swapped
            )));
        }

        Ok(angle)
    }

    /// Hash of the Cartesian projection
    ///
    /// Only identical projections are guaranteed to hash alike; see
    /// [`shared::hash_code`].
    pub fn hash_code(&self) -> u64 {
        shared::hash_code(SPHERICAL_TAG, &self.to_cartesian())
    }
}

fn project(radius: f64, latitude: f64, longitude: f64) -> Cartesian3 {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    Cartesian3::new(
        radius * sin_lat * cos_lon,
        radius * sin_lat * sin_lon,
        radius * cos_lat,
    )
}

fn great_circle_angle(first: &Spherical, second: &Spherical) -> f64 {
    let delta_latitude = (first.latitude - second.latitude).abs();

    let left = first.longitude.sin() * second.longitude.sin();
    let right = first.longitude.cos() * second.longitude.cos() * delta_latitude.cos();

    // Rounding can push coincident directions just past 1
    (left + right).clamp(-1.0, 1.0).acos()
}

impl Coordinate for Spherical {
    fn to_cartesian(&self) -> Cartesian3 {
        Spherical::to_cartesian(self)
    }

    fn to_spherical(&self) -> Result<Spherical> {
        Ok(*self)
    }

    fn central_angle(&self, other: &dyn Coordinate) -> Result<f64> {
        let other = other.to_spherical()?;

        let angle = if cfg!(debug_assertions) {
            self.verify_angle_symmetry(&other)?
        } else {
            great_circle_angle(self, &other)
        };

        if !angle.is_finite() || !(0.0..=MAX_CENTRAL_ANGLE).contains(&angle) {
            return Err(CoordinateError::Arithmetic(format!(
                "Can not calculate central angle with reasonable value, result would be {}",
                angle
            )));
        }

        Ok(angle)
    }

    fn read_from(record: &dyn Record) -> Result<Self> {
        shared::read_cartesian(record)?.to_spherical()
    }
}

impl PartialEq for Spherical {
    fn eq(&self, other: &Self) -> bool {
        shared::is_equal(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryRecord;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn test_construction_with_valid_arguments() {
        let normal = Spherical::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(normal.radius(), 1.0);
        assert_eq!(normal.latitude(), 2.0);
        assert_eq!(normal.longitude(), 3.0);

        let lower = Spherical::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(lower.latitude(), 0.0);

        let upper = Spherical::new(f64::MAX, 180.0 - 0.000001, 360.0 - 0.000001).unwrap();
        assert_eq!(upper.longitude(), 360.0 - 0.000001);
    }

    #[rstest]
    #[case(-1.0, 2.0, 3.0)]
    #[case(-1.0, 0.0, 0.0)]
    #[case(10.0, 180.0, 3.0)]
    #[case(10.0, -10.0, 3.0)]
    #[case(10.0, 200.0, 3.0)]
    #[case(10.0, 40.0, 400.0)]
    #[case(10.0, 40.0, -10.0)]
    #[case(10.0, 40.0, 360.0)]
    #[case(f64::NAN, 1.0, 1.0)]
    #[case(1.0, f64::NAN, 1.0)]
    #[case(1.0, 1.0, f64::NAN)]
    fn test_construction_rejects_out_of_range(
        #[case] radius: f64,
        #[case] latitude: f64,
        #[case] longitude: f64,
    ) {
        let result = Spherical::new(radius, latitude, longitude);
        assert!(
            matches!(result, Err(CoordinateError::InvalidArgument(_))),
            "({}, {}, {}) was accepted",
            radius,
            latitude,
            longitude
        );
        assert!(!Spherical::is_valid_representation(radius, latitude, longitude));
    }

    #[test]
    fn test_to_cartesian() {
        let on_x_axis = Spherical::new(2.0, PI / 2.0, 0.0).unwrap().to_cartesian();
        assert_abs_diff_eq!(on_x_axis.x, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(on_x_axis.y, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(on_x_axis.z, 0.0, epsilon = 1e-15);

        let on_z_axis = Spherical::new(3.0, 0.0, 1.0).unwrap().to_cartesian();
        assert_eq!(on_z_axis.x, 0.0);
        assert_eq!(on_z_axis.y, 0.0);
        assert_eq!(on_z_axis.z, 3.0);
    }

    #[test]
    fn test_central_angle() {
        let first = Spherical::new(5.0, 30.0, 10.0).unwrap();
        let second = Spherical::new(5.0, 40.0, 20.0).unwrap();

        let angle = first.central_angle(&second).unwrap();
        assert_abs_diff_eq!(angle, 1.7817115960047594, epsilon = 1e-7);
        assert_eq!(angle, second.central_angle(&first).unwrap());
    }

    #[test]
    fn test_central_angle_of_identical_directions() {
        let point = Spherical::new(7.0, 1.2, 4.5).unwrap();
        let farther = Spherical::new(70.0, 1.2, 4.5).unwrap();

        let angle = point.central_angle(&farther).unwrap();
        assert!(angle >= 0.0);
        assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_central_angle_rejects_unconvertible_operand() {
        let point = Spherical::new(1.0, 1.0, 1.0).unwrap();
        let nan = Cartesian3::new(f64::NAN, 0.0, 0.0);

        let result = point.central_angle(&nan);
        assert!(matches!(result, Err(CoordinateError::Arithmetic(_))));
    }

    #[test]
    fn test_verify_angle_symmetry() {
        let first = Spherical::new(5.0, 30.0, 10.0).unwrap();
        let second = Spherical::new(5.0, 40.0, 20.0).unwrap();

        let verified = first.verify_angle_symmetry(&second).unwrap();
        assert_eq!(verified, first.central_angle(&second).unwrap());
    }

    #[test]
    fn test_verify_projection() {
        let point = Spherical::new(5.0, 30.0, 10.0).unwrap();
        let projection = point.verify_projection().unwrap();
        assert!(projection.fields_identical(&point.to_cartesian()));
        assert_relative_eq!(projection.magnitude(), 5.0, epsilon = 1e-12);

        let squares_overflow = Spherical::new(1.5e154, 1.0, 2.0).unwrap();
        let projection = squares_overflow.verify_projection().unwrap();
        assert_relative_eq!(projection.magnitude(), 1.5e154, max_relative = 1e-12);

        let huge = Spherical::new(1e300, 1.0, 2.0).unwrap();
        assert!(huge.verify_projection().is_ok());
    }

    #[test]
    fn test_read_from_converts_stored_cartesian() {
        let mut record = MemoryRecord::new();
        Cartesian3::new(1.0, 2.0, 3.0).write_on(&mut record).unwrap();

        let spherical = Spherical::read_from(&record).unwrap();
        assert_abs_diff_eq!(spherical.radius(), 3.7416573867739413, epsilon = 1e-7);
        assert_abs_diff_eq!(spherical.latitude(), 0.6405223126794245, epsilon = 1e-7);
        assert_abs_diff_eq!(spherical.longitude(), 1.1071487177940904, epsilon = 1e-7);
    }

    #[test]
    fn test_write_on_stores_cartesian_projection() {
        let mut record = MemoryRecord::new();
        let point = Spherical::new(2.0, PI / 2.0, 0.0).unwrap();
        point.write_on(&mut record).unwrap();

        assert_abs_diff_eq!(record.get_f64("x_coordinate").unwrap(), 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(record.get_f64("y_coordinate").unwrap(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(record.get_f64("z_coordinate").unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_tolerant_equality_and_hash() {
        let point = Spherical::new(0.1, 2.0, 3.0).unwrap();
        let converted = point.to_cartesian().to_spherical().unwrap();

        assert_eq!(point, converted);
        assert_eq!(point.hash_code(), point.hash_code());
        assert_ne!(point.hash_code(), point.to_cartesian().hash_code());
    }

    #[test]
    fn test_serde_validates() {
        let point = Spherical::new(5.0, 1.5, 3.0).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"radius":5.0,"latitude":1.5,"longitude":3.0}"#);

        let restored: Spherical = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.radius(), 5.0);

        let invalid = serde_json::from_str::<Spherical>(
            r#"{"radius":-5.0,"latitude":1.5,"longitude":3.0}"#,
        );
        assert!(invalid.is_err());
    }
}
