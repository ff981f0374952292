// Nearest-waypoint resolution
// Pure geometry over already-decoded data; no API calls happen here.

use crate::error::{ClientError, Result};
use crate::models::{Coordinate, Waypoint};

/// Euclidean distance between two points.
///
/// Differences are taken in `i64` so the full `i32` range cannot overflow.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = (i64::from(a.x) - i64::from(b.x)) as f64;
    let dy = (i64::from(a.y) - i64::from(b.y)) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Closest candidate to `ship` and its distance.
///
/// Candidates are scanned in the order given and only a strictly smaller
/// distance replaces the current best, so on ties the earlier candidate wins.
/// Pass candidates through [`sort_by_symbol`] first for a reproducible choice.
pub fn find_nearest(ship: Coordinate, candidates: &[Waypoint]) -> Result<(&Waypoint, f64)> {
    let mut nearest: Option<&Waypoint> = None;
    let mut min_distance = f64::INFINITY;

    for waypoint in candidates {
        let d = distance(ship, waypoint.location);
        if d < min_distance {
            nearest = Some(waypoint);
            min_distance = d;
        }
    }

    nearest
        .map(|waypoint| (waypoint, min_distance))
        .ok_or(ClientError::NoCandidate)
}

/// Symbol of the closest candidate to `ship`.
pub fn nearest_waypoint(ship: Coordinate, candidates: &[Waypoint]) -> Result<&str> {
    find_nearest(ship, candidates).map(|(waypoint, _)| waypoint.symbol.as_str())
}

/// Canonical candidate order for tie-breaking.
pub fn sort_by_symbol(waypoints: &mut [Waypoint]) {
    waypoints.sort_by(|a, b| a.symbol.cmp(&b.symbol));
}
