use crate::prelude::{
    Constellation, EphemerisEntry, EphemerisEpoch, MatchedEpochPair, ObservationEntry,
    ObservationEpoch, Timestamp, Vector3, SPEED_OF_LIGHT_M_S, SV,
};

/// Synthetic, noise free positioning scenario: satellites are spread
/// over the sky of a known receiver position and the pseudo ranges
/// are computed analytically.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Receiver ECEF position (m)
    pub rx_m: Vector3<f64>,
    /// Receiver clock offset (ns)
    pub rx_clock_ns: f64,
    /// Satellites (prn, position km, clock µs)
    pub satellites: Vec<(u8, Vector3<f64>, f64)>,
}

impl Scenario {
    /// Receiver position used by most tests, central Europe
    pub fn reference_rx_m() -> Vector3<f64> {
        Vector3::new(4201000.0, 168000.0, 4780000.0)
    }

    /// Builds a [Scenario] from (azimuth, elevation) pairs in degrees,
    /// satellites orbiting 20200 km away from the receiver.
    pub fn new(rx_m: Vector3<f64>, sky: &[(f64, f64)]) -> Self {
        let up = rx_m.normalize();
        let east = Vector3::new(-up[1], up[0], 0.0).normalize();
        let north = up.cross(&east);

        let satellites = sky
            .iter()
            .enumerate()
            .map(|(i, (azim, elev))| {
                let (azim, elev) = (azim.to_radians(), elev.to_radians());
                let los = (east * azim.sin() + north * azim.cos()) * elev.cos() + up * elev.sin();
                let sv_m = rx_m + los * 20_200_000.0;
                ((i + 1) as u8, sv_m / 1.0E3, 0.0)
            })
            .collect();

        Self {
            rx_m,
            rx_clock_ns: 0.0,
            satellites,
        }
    }

    /// Four satellites, good geometry
    pub fn four_sv() -> Self {
        Self::new(
            Self::reference_rx_m(),
            &[(0.0, 30.0), (90.0, 45.0), (180.0, 60.0), (270.0, 35.0)],
        )
    }

    /// Six satellites, good geometry
    pub fn six_sv() -> Self {
        Self::new(
            Self::reference_rx_m(),
            &[
                (0.0, 30.0),
                (60.0, 45.0),
                (120.0, 60.0),
                (180.0, 25.0),
                (240.0, 50.0),
                (300.0, 80.0),
            ],
        )
    }

    /// Returns [Scenario] with given clock offset (µs) on every satellite
    pub fn with_clock_bias_us(&self, clock_us: f64) -> Self {
        let mut s = self.clone();
        for (_, _, clock) in s.satellites.iter_mut() {
            *clock = clock_us;
        }
        s
    }

    /// Returns [Scenario] with given receiver clock offset (ns)
    pub fn with_receiver_clock_ns(&self, clock_ns: f64) -> Self {
        let mut s = self.clone();
        s.rx_clock_ns = clock_ns;
        s
    }

    /// Returns [Scenario] limited to the first n satellites
    pub fn truncated(&self, n: usize) -> Self {
        let mut s = self.clone();
        s.satellites.truncate(n);
        s
    }

    pub fn timestamp() -> Timestamp {
        Timestamp::new(2022, 1, 5, 0, 30)
    }

    /// Satellite position in meters, as the solver sees it
    fn sv_position_m(position_km: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            position_km[0] * 1.0E3,
            position_km[1] * 1.0E3,
            position_km[2] * 1.0E3,
        )
    }

    /// Raw pseudo range such that the clock corrected pseudo range
    /// equals the geometric range plus the receiver clock term.
    pub fn pseudo_range_m(&self, position_km: &Vector3<f64>, clock_us: f64) -> f64 {
        let rho = (Self::sv_position_m(position_km) - self.rx_m).norm();
        rho + self.rx_clock_ns * 1.0E-9 * SPEED_OF_LIGHT_M_S
            - clock_us * 1.0E-6 * SPEED_OF_LIGHT_M_S
    }

    pub fn observation_epoch(&self) -> ObservationEpoch {
        let mut epoch = ObservationEpoch::new(Self::timestamp());
        for (prn, position_km, clock_us) in self.satellites.iter() {
            epoch.entries.push(ObservationEntry::new(
                SV::new(Constellation::GPS, *prn),
                self.pseudo_range_m(position_km, *clock_us),
            ));
        }
        epoch
    }

    pub fn ephemeris_epoch(&self) -> EphemerisEpoch {
        let mut epoch = EphemerisEpoch::new(Self::timestamp());
        for (prn, position_km, clock_us) in self.satellites.iter() {
            epoch.entries.push(EphemerisEntry::new(
                SV::new(Constellation::GPS, *prn),
                (position_km[0], position_km[1], position_km[2]),
                *clock_us,
            ));
        }
        epoch
    }

    pub fn pair(&self) -> MatchedEpochPair {
        MatchedEpochPair::new(self.observation_epoch(), self.ephemeris_epoch())
    }

    /// Precise ephemeris file describing this [Scenario] at 00:15 and 00:30
    pub fn sp3(&self) -> String {
        let mut content = String::from("#dP2022  1  5  0  0  0.00000000      96 ORBIT IGS14\n");
        for minute in [15, 30] {
            content.push_str(&format!("*  2022  1  5  0 {:2}  0.00000000\n", minute));
            for (prn, position_km, clock_us) in self.satellites.iter() {
                content.push_str(&format!(
                    "PG{:02} {:13.6} {:13.6} {:13.6} {:13.6}\n",
                    prn, position_km[0], position_km[1], position_km[2], clock_us,
                ));
            }
        }
        content.push_str("EOF\n");
        content
    }

    /// Observation file at 00:30, built from the satellite states
    /// effectively parsed from the ephemeris file.
    pub fn rinex(&self, states: &EphemerisEpoch) -> String {
        let mut content = String::from("     3.04           OBSERVATION DATA    M\n");
        content.push_str(&format!("{:60}END OF HEADER\n", ""));
        content.push_str(&format!(
            "> 2022 01 05 00 30  0.0000000  0 {:2}\n",
            states.entries.len()
        ));
        for state in states.entries.iter() {
            let (x_km, y_km, z_km) = state.position_km;
            let position_km = Vector3::new(x_km, y_km, z_km);
            content.push_str(&format!(
                "G{:02}  {:.4}  45.000\n",
                state.sv.prn,
                self.pseudo_range_m(&position_km, state.clock_bias_us),
            ));
        }
        content
    }
}
