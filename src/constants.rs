/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// WGS84 Earth Frame Ellipsoid semi-major axis (meters)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// Minimal number of satellites to resolve (x, y, z, t)
pub const MIN_SV_REQUIRED: usize = 4;

/// Meters per kilometer, SP3 positions are expressed in km
pub(crate) const KM_TO_M: f64 = 1.0E3;

/// Seconds per microsecond, SP3 clock offsets are expressed in µs
pub(crate) const US_TO_S: f64 = 1.0E-6;
