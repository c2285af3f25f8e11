use crate::time::Timestamp;

/// Geodetic sample of a moving object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LlaSample {
    pub time: Timestamp,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}
