//! Location: owner of exactly one coordinate
//!
//! A location adds no geometry of its own. It holds a coordinate, hands it out
//! by reference and delegates distance and persistence to it.

use crate::coordinates::{AnyCoordinate, Coordinate};
use crate::persistence::Record;
use crate::Result;

/// A place described by a single coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    coordinate: AnyCoordinate,
}

impl Location {
    /// Create a location owning `coordinate`
    pub fn new(coordinate: impl Into<AnyCoordinate>) -> Self {
        Self {
            coordinate: coordinate.into(),
        }
    }

    /// Read a location whose coordinate has the representation of `type_reference`
    ///
    /// The value of `type_reference` is discarded; it only selects the reader.
    pub fn read_from(record: &dyn Record, type_reference: &AnyCoordinate) -> Result<Self> {
        AnyCoordinate::read_like(record, type_reference).map(Self::new)
    }

    /// Write the held coordinate into `record`
    pub fn write_on(&self, record: &mut dyn Record) -> Result<()> {
        self.coordinate.write_on(record)
    }

    /// The held coordinate
    pub fn coordinate(&self) -> &AnyCoordinate {
        &self.coordinate
    }

    /// Distance between the coordinates of both locations
    pub fn cartesian_distance(&self, other: &Location) -> Result<f64> {
        self.coordinate.cartesian_distance(&other.coordinate)
    }

    /// Central angle between the coordinates of both locations
    pub fn central_angle(&self, other: &Location) -> Result<f64> {
        self.coordinate.central_angle(&other.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::{Cartesian3, Spherical};
    use crate::persistence::MemoryRecord;
    use crate::CoordinateError;

    #[test]
    fn test_construction() {
        let cartesian = Cartesian3::origin();
        let spherical = Spherical::new(10.0, 6.0, 20.0).unwrap();

        let first = Location::new(cartesian);
        let second = Location::new(spherical);

        assert_eq!(*first.coordinate(), AnyCoordinate::from(cartesian));
        assert_eq!(*second.coordinate(), AnyCoordinate::from(spherical));
    }

    #[test]
    fn test_cartesian_round_trip() {
        let mut record = MemoryRecord::new();
        let type_reference = AnyCoordinate::from(Cartesian3::origin());

        let stored = Location::new(Cartesian3::new(1.0, 2.0, 3.0));
        stored.write_on(&mut record).unwrap();

        let restored = Location::read_from(&record, &type_reference).unwrap();
        assert!(restored.coordinate().is_cartesian());
        assert_eq!(restored, stored);
    }

    #[test]
    fn test_spherical_round_trip() {
        let mut record = MemoryRecord::new();
        let type_reference = AnyCoordinate::from(Spherical::origin());

        let stored = Location::new(Spherical::new(0.0, 20.0, 30.0).unwrap());
        stored.write_on(&mut record).unwrap();

        let restored = Location::read_from(&record, &type_reference).unwrap();
        assert!(restored.coordinate().is_spherical());
        assert_eq!(restored, stored);
    }

    #[test]
    fn test_read_from_empty_record() {
        let record = MemoryRecord::new();
        let type_reference = AnyCoordinate::from(Cartesian3::origin());

        let result = Location::read_from(&record, &type_reference);
        assert!(matches!(result, Err(CoordinateError::Record(_))));
    }

    #[test]
    fn test_distance_between_locations() {
        let first = Location::new(Cartesian3::new(10.0, 20.0, -5.0));
        let second = Location::new(Cartesian3::origin());

        let distance = first.cartesian_distance(&second).unwrap();
        assert!((distance - 22.9128784747792).abs() < 1e-12);
        assert_eq!(distance, second.cartesian_distance(&first).unwrap());
    }

    #[test]
    fn test_central_angle_between_locations() {
        let first = Location::new(Spherical::new(5.0, 30.0, 10.0).unwrap());
        let second = Location::new(Spherical::new(5.0, 40.0, 20.0).unwrap());

        let angle = first.central_angle(&second).unwrap();
        assert!((angle - 1.7817115960047594).abs() < 1e-7);
    }
}
