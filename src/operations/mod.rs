// Operations module - computations layered over API data
pub mod navigation;

pub use navigation::{distance, find_nearest, nearest_waypoint, sort_by_symbol};
