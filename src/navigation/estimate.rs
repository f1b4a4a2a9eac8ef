use nalgebra::Vector4;

use crate::prelude::Vector3;

/// [PositionEstimate] (x, y, z, t) of the Gauss-Newton process,
/// updated once per iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEstimate {
    /// ECEF position (m) and clock term
    x: Vector4<f64>,
    /// Number of updates so far
    pub iteration: usize,
}

impl std::fmt::Display for PositionEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={:.3}m y={:.3}m z={:.3}m dt={:.6E}ns",
            self.x[0], self.x[1], self.x[2], self.x[3]
        )
    }
}

impl PositionEstimate {
    /// Creates a new [PositionEstimate] at given ECEF position (m), with null clock term.
    pub fn from_ecef_m(ecef_m: Vector3<f64>) -> Self {
        Self {
            x: Vector4::new(ecef_m[0], ecef_m[1], ecef_m[2], 0.0),
            iteration: 0,
        }
    }

    /// Applies the correction additively
    pub fn update(&mut self, dx: Vector4<f64>) {
        self.x += dx;
        self.iteration += 1;
    }

    /// ECEF position (m)
    pub fn position_ecef_m(&self) -> Vector3<f64> {
        Vector3::new(self.x[0], self.x[1], self.x[2])
    }

    /// Receiver clock term. The clock sensitivity being `c * 1E-9`,
    /// this is expressed in nanoseconds.
    pub fn clock_offset_ns(&self) -> f64 {
        self.x[3]
    }

    /// Complete state vector (x, y, z, t)
    pub fn to_vector(&self) -> Vector4<f64> {
        self.x
    }
}
