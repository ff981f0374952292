// SpaceTraders command-line client library
// Authenticated request templating, bounded response reads, and waypoint lookups

pub mod error;
pub mod verbosity;
pub mod models;
pub mod client;
pub mod operations;
pub mod savefile;
pub mod config;
pub mod cli;

// Re-export commonly used types
pub use models::{
    agent::Agent,
    ship::{ShipNav, ShipNavState},
    waypoint::{Coordinate, Waypoint},
};

pub use client::{RawResponse, RequestDescriptor, RequestTemplate, SpaceTradersClient, WaypointQuery};
pub use config::ClientConfig;
pub use error::{ClientError, Result};

// Constants
pub const API_BASE_URL: &str = "https://api.spacetraders.io";
pub const DEFAULT_SAVE_DIR: &str = "savefiles";
pub const DEFAULT_FACTION: &str = "COSMIC";
pub const DEFAULT_CONFIG_FILE: &str = "stcli.toml";
