// Models module - API payloads used by the client

pub mod agent;
pub mod ship;
pub mod waypoint;
pub mod responses;

pub use agent::*;
pub use ship::*;
pub use waypoint::*;
pub use responses::*;
