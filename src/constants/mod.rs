//! Constants module for coordinate calculations

use std::f64::consts::PI;

// Equality
/// Two coordinates whose finite distance is at most this value are considered equal
pub const EPSILON_DISTANCE: f64 = 1.0e-4;

// Spherical ranges
/// Smallest admissible radius
pub const MIN_RADIUS: f64 = 0.0;
/// Smallest admissible latitude
pub const MIN_LATITUDE: f64 = 0.0;
/// Exclusive upper bound for latitude
pub const LATITUDE_UPPER_LIMIT: f64 = 180.0;
/// Smallest admissible longitude
pub const MIN_LONGITUDE: f64 = 0.0;
/// Exclusive upper bound for longitude
pub const LONGITUDE_UPPER_LIMIT: f64 = 360.0;

// Angles
/// Largest central angle `acos` can produce, in radians
pub const MAX_CENTRAL_ANGLE: f64 = PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Record columns
/// Column holding the x component
pub const X_COLUMN: &str = "x_coordinate";
/// Column holding the y component
pub const Y_COLUMN: &str = "y_coordinate";
/// Column holding the z component
pub const Z_COLUMN: &str = "z_coordinate";
