//! Great-circle distances and nearest-bin selection.
//!
//! Everything here is pure: coordinates are taken as given and never validated.
//! Callers that accept untrusted positions should go through [`GeoPoint::new`].

use crate::model::{Bin, GeoPoint};

/// Mean Earth radius in meters used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const METERS_PER_KM: f64 = 1000.0;

/// Great-circle distance between two points in meters.
#[must_use]
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let from_lat = from.latitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let half_chord = ((delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_M * angle
}

/// Render a distance for display: whole meters below one kilometer, otherwise
/// kilometers with one decimal. Both round half away from zero.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < METERS_PER_KM {
        format!("{:.0} m", meters.round())
    } else {
        let tenths_of_km = (meters / 100.0).round();
        format!("{:.1} km", tenths_of_km / 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Closest bin to the user together with its distance.
pub struct Nearest<'bins> {
    /// The selected bin.
    pub bin: &'bins Bin,
    /// Distance from the user in meters.
    pub meters: f64,
}

impl Nearest<'_> {
    /// Distance formatted with [`format_distance`].
    #[must_use]
    pub fn label(&self) -> String {
        format_distance(self.meters)
    }
}

/// Select the bin closest to `user`, keeping the first one on ties.
///
/// Returns `None` when the user position is unknown or there are no candidates.
#[must_use]
pub fn nearest(user: Option<GeoPoint>, candidates: &[Bin]) -> Option<Nearest<'_>> {
    let user = user?;
    candidates
        .iter()
        .map(|bin| Nearest {
            bin,
            meters: distance_meters(user, bin.location),
        })
        // `min_by` returns the first of several equal minima.
        .min_by(|left, right| left.meters.total_cmp(&right.meters))
}

/// Same as [`nearest`] but yields only the bin.
#[must_use]
pub fn find_nearest(user: Option<GeoPoint>, candidates: &[Bin]) -> Option<&Bin> {
    nearest(user, candidates).map(|found| found.bin)
}

/// All candidates with their distance to `user`, closest first.
///
/// Equal distances keep their input order. Empty when the user position is unknown.
#[must_use]
pub fn by_distance(user: Option<GeoPoint>, candidates: &[Bin]) -> Vec<(&Bin, f64)> {
    let Some(user) = user else {
        return Vec::new();
    };
    let mut ranked: Vec<(&Bin, f64)> = candidates
        .iter()
        .map(|bin| (bin, distance_meters(user, bin.location)))
        .collect();
    ranked.sort_by(|left, right| left.1.total_cmp(&right.1));
    ranked
}
