use serde::Deserialize;

use super::waypoint::Coordinate;

/// Body of `GET /v2/my/ships/{shipSymbol}/nav`.
#[derive(Debug, Deserialize, Clone)]
pub struct ShipNav {
    #[serde(rename = "systemSymbol")]
    pub system_symbol: String,
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: String,
    pub route: ShipRoute,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "flightMode", default)]
    pub flight_mode: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShipRoute {
    pub destination: ShipRouteWaypoint,
    pub origin: Option<ShipRouteWaypoint>,
    #[serde(rename = "departureTime")]
    pub departure_time: Option<String>,
    pub arrival: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShipRouteWaypoint {
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub waypoint_type: String,
    #[serde(rename = "systemSymbol", default)]
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
}

/// The part of a ship's navigation that proximity queries need.
/// Built fresh from every nav lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipNavState {
    pub ship_symbol: String,
    pub system_symbol: String,
    pub destination: Coordinate,
}

impl ShipNavState {
    pub fn from_nav(ship_symbol: &str, nav: &ShipNav) -> Self {
        Self {
            ship_symbol: ship_symbol.to_string(),
            system_symbol: nav.system_symbol.clone(),
            destination: Coordinate::new(nav.route.destination.x, nav.route.destination.y),
        }
    }
}
