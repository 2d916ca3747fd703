pub mod cartesian;
pub mod shared;
pub mod spherical;

use serde::{Deserialize, Serialize};

pub use cartesian::Cartesian3;
pub use shared::Coordinate;
pub use spherical::Spherical;

use crate::persistence::Record;
use crate::Result;

/// A coordinate held in either representation
///
/// Two values are `==` only if they hold the same representation and are
/// [`Coordinate::is_equal`]; a Cartesian and a spherical value describing the
/// same point are `is_equal` but never `==`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyCoordinate {
    Cartesian(Cartesian3),
    Spherical(Spherical),
}

impl AnyCoordinate {
    pub fn is_cartesian(&self) -> bool {
        matches!(self, AnyCoordinate::Cartesian(_))
    }

    pub fn is_spherical(&self) -> bool {
        matches!(self, AnyCoordinate::Spherical(_))
    }

    /// Read a coordinate of the same representation as `witness`
    ///
    /// Only the variant of `witness` is looked at; its values are ignored.
    pub fn read_like(record: &dyn Record, witness: &AnyCoordinate) -> Result<AnyCoordinate> {
        Ok(match witness {
            AnyCoordinate::Cartesian(_) => Cartesian3::read_from(record)?.into(),
            AnyCoordinate::Spherical(_) => Spherical::read_from(record)?.into(),
        })
    }

    /// Hash of the Cartesian projection, distinct per representation
    ///
    /// Values with identical projections hash identically. Values that are
    /// `==` only within [`EPSILON_DISTANCE`](crate::constants::EPSILON_DISTANCE)
    /// may not, since the hash covers exact bit patterns.
    pub fn hash_code(&self) -> u64 {
        match self {
            AnyCoordinate::Cartesian(c) => c.hash_code(),
            AnyCoordinate::Spherical(s) => s.hash_code(),
        }
    }
}

impl Coordinate for AnyCoordinate {
    fn to_cartesian(&self) -> Cartesian3 {
        match self {
            AnyCoordinate::Cartesian(c) => *c,
            AnyCoordinate::Spherical(s) => s.to_cartesian(),
        }
    }

    fn to_spherical(&self) -> Result<Spherical> {
        match self {
            AnyCoordinate::Cartesian(c) => c.to_spherical(),
            AnyCoordinate::Spherical(s) => Ok(*s),
        }
    }

    fn central_angle(&self, other: &dyn Coordinate) -> Result<f64> {
        match self {
            AnyCoordinate::Cartesian(c) => c.central_angle(other),
            AnyCoordinate::Spherical(s) => s.central_angle(other),
        }
    }

    /// Reads the Cartesian columns; use [`AnyCoordinate::read_like`] to pick
    /// another representation
    fn read_from(record: &dyn Record) -> Result<Self> {
        Ok(Cartesian3::read_from(record)?.into())
    }
}

impl PartialEq for AnyCoordinate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyCoordinate::Cartesian(a), AnyCoordinate::Cartesian(b)) => a == b,
            (AnyCoordinate::Spherical(a), AnyCoordinate::Spherical(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Cartesian3> for AnyCoordinate {
    fn from(coordinate: Cartesian3) -> Self {
        AnyCoordinate::Cartesian(coordinate)
    }
}

impl From<Spherical> for AnyCoordinate {
    fn from(coordinate: Spherical) -> Self {
        AnyCoordinate::Spherical(coordinate)
    }
}
