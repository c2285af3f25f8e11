//! Walker-style satellite layout: planes evenly spread in RAAN, satellites evenly
//! spread in true anomaly, with optional half-slot staggering on odd planes.

use std::fmt;

use outage_config::ConstellationConfig;

/// Classical orbital elements handed to the two-body propagator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub arg_of_perigee_deg: f64,
    pub raan_deg: f64,
    pub true_anomaly_deg: f64,
}

impl fmt::Display for ClassicalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={} km e={} i={} deg argp={} deg raan={} deg ta={} deg",
            self.semi_major_axis_km,
            self.eccentricity,
            self.inclination_deg,
            self.arg_of_perigee_deg,
            self.raan_deg,
            self.true_anomaly_deg
        )
    }
}

/// One satellite position in the layout, numbered from 1 in plane and slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteSlot {
    pub plane: u32,
    pub slot: u32,
    pub elements: ClassicalElements,
}

impl SatelliteSlot {
    /// `Sat<plane><slot>`, e.g. `Sat11`.
    pub fn name(&self) -> String {
        format!("Sat{}{}", self.plane, self.slot)
    }

    /// `Sensor<plane><slot>`, e.g. `Sensor11`.
    pub fn sensor_name(&self) -> String {
        format!("Sensor{}{}", self.plane, self.slot)
    }

    pub fn path(&self) -> String {
        format!("Satellite/{}", self.name())
    }

    pub fn sensor_path(&self) -> String {
        format!("{}/Sensor/{}", self.path(), self.sensor_name())
    }
}

/// Lay out `planes * sats_per_plane` satellites.
///
/// RAAN and true-anomaly steps are whole degrees (`span / planes`, `360 / sats`),
/// matching how the application scripts enumerate them.
pub fn walker_layout(config: &ConstellationConfig) -> Vec<SatelliteSlot> {
    let raan_step = config.raan_span_deg / config.planes.max(1);
    let anomaly_step = 360 / config.sats_per_plane.max(1);
    let stagger = f64::from(anomaly_step) / 2.0;

    let mut slots = Vec::with_capacity((config.planes * config.sats_per_plane) as usize);
    for plane in 1..=config.planes {
        let raan_deg = f64::from((plane - 1) * raan_step);
        let offset = if config.stagger && plane % 2 == 1 {
            stagger
        } else {
            0.0
        };
        for slot in 1..=config.sats_per_plane {
            slots.push(SatelliteSlot {
                plane,
                slot,
                elements: ClassicalElements {
                    semi_major_axis_km: config.semi_major_axis_km,
                    eccentricity: config.eccentricity,
                    inclination_deg: config.inclination_deg,
                    arg_of_perigee_deg: config.arg_of_perigee_deg,
                    raan_deg,
                    true_anomaly_deg: f64::from((slot - 1) * anomaly_step) + offset,
                },
            });
        }
    }
    slots
}
