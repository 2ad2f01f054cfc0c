//! Nearest-station lookup over a set of parsed headers.

use crate::error::{Result, Tmy2Error};
use crate::extractor::StationSummary;

const EARTH_RADIUS_KM: f64 = 6371.0;
const MILES_TO_KM: f64 = 1.609344;

/// Great-circle distance in kilometres between two points in decimal degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Parse `"LAT,LON"` in decimal degrees.
pub fn parse_lat_lon(input: &str) -> Result<(f64, f64)> {
    let invalid = || Tmy2Error::InvalidCoordinate {
        input: input.to_string(),
    };

    let (lat, lon) = input.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid());
    }

    Ok((lat, lon))
}

#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Vec<StationSummary>,
}

impl StationIndex {
    pub fn new(stations: Vec<StationSummary>) -> Self {
        Self { stations }
    }

    pub fn push(&mut self, station: StationSummary) {
        self.stations.push(station);
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Closest station to `(lat, lon)` and its distance in km.
    ///
    /// A `radius_miles` of zero disables the range check. A negative or NaN
    /// radius matches nothing.
    pub fn nearest(&self, lat: f64, lon: f64, radius_miles: f64) -> Option<(&StationSummary, f64)> {
        if radius_miles.is_nan() || radius_miles < 0.0 {
            return None;
        }

        let (closest, distance) = self
            .stations
            .iter()
            .map(|s| (s, haversine_km(s.lat, s.lon, lat, lon)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        if radius_miles > 0.0 && distance > radius_miles * MILES_TO_KM {
            return None;
        }

        Some((closest, distance))
    }
}
