//! ECEF to geodetic conversion
use map_3d::{ecef2geodetic, rad2deg, Ellipsoid};

use crate::prelude::{Error, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cartesian coordinates closer than this (m) to Earth's center
/// cannot be projected
const MIN_RADIUS_M: f64 = 1.0;

/// Reference ellipsoid
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceEllipsoid {
    /// GPS reference ellipsoid
    #[default]
    WGS84,
    /// Former GPS reference ellipsoid
    WGS72,
    /// Geodetic Reference System 1980
    GRS80,
    /// GLONASS reference ellipsoid
    PZ90,
}

impl std::fmt::Display for ReferenceEllipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::WGS84 => write!(f, "WGS84"),
            Self::WGS72 => write!(f, "WGS72"),
            Self::GRS80 => write!(f, "GRS80"),
            Self::PZ90 => write!(f, "PZ90"),
        }
    }
}

impl ReferenceEllipsoid {
    fn ellipsoid(&self) -> Ellipsoid {
        match self {
            Self::WGS84 => Ellipsoid::WGS84,
            Self::WGS72 => Ellipsoid::WGS72,
            Self::GRS80 => Ellipsoid::GRS80,
            Self::PZ90 => Ellipsoid::PZ90,
        }
    }
}

/// Resolved receiver location
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserLocation {
    /// ECEF coordinates (m)
    pub ecef_m: (f64, f64, f64),
    /// Latitude (decimal degrees)
    pub latitude_ddeg: f64,
    /// Longitude (decimal degrees), within ]-180°, 180°]
    pub longitude_ddeg: f64,
    /// Altitude above the ellipsoid (m)
    pub altitude_m: f64,
}

impl std::fmt::Display for UserLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "lat={:.6}° long={:.6}° alt={:.3}m",
            self.latitude_ddeg, self.longitude_ddeg, self.altitude_m
        )
    }
}

/// Wraps longitude (ddeg) into ]-180°, 180°]
fn symmetric_longitude(longitude_ddeg: f64) -> f64 {
    let wrapped = longitude_ddeg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Projects ECEF coordinates onto the [ReferenceEllipsoid]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeodeticConverter {
    ellipsoid: ReferenceEllipsoid,
}

impl GeodeticConverter {
    /// Creates a new [GeodeticConverter]
    pub fn new(ellipsoid: ReferenceEllipsoid) -> Self {
        Self { ellipsoid }
    }

    /// Converts ECEF (m) coordinates to [UserLocation]
    pub fn convert(&self, ecef_m: &Vector3<f64>) -> Result<UserLocation, Error> {
        if ecef_m.iter().any(|c| !c.is_finite()) {
            return Err(Error::ConversionError(format!(
                "non finite coordinates {:?}",
                ecef_m.as_slice()
            )));
        }

        if ecef_m.norm() < MIN_RADIUS_M {
            return Err(Error::ConversionError(
                "coordinates at Earth's center".to_string(),
            ));
        }

        let (x, y, z) = (ecef_m[0], ecef_m[1], ecef_m[2]);
        let (lat_rad, long_rad, altitude_m) = ecef2geodetic(x, y, z, self.ellipsoid.ellipsoid());

        if !(lat_rad.is_finite() && long_rad.is_finite() && altitude_m.is_finite()) {
            return Err(Error::ConversionError(format!(
                "{} projection diverged",
                self.ellipsoid
            )));
        }

        Ok(UserLocation {
            ecef_m: (x, y, z),
            latitude_ddeg: rad2deg(lat_rad),
            longitude_ddeg: symmetric_longitude(rad2deg(long_rad)),
            altitude_m,
        })
    }
}
