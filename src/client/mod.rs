// Client module - SpaceTraders API client
pub mod api;
pub mod body;
pub mod template;

pub use api::{NearestWaypoint, SpaceTradersClient, WaypointQuery};
pub use body::{read_bounded, read_response, BodySource, RawResponse, DEFAULT_BODY_CAPACITY};
pub use template::{RequestDescriptor, RequestTemplate};
