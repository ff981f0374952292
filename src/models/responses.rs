use serde::Deserialize;

/// Every SpaceTraders payload arrives wrapped in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// List endpoints add paging information next to `data`.
#[derive(Debug, Deserialize)]
pub struct PagedEnvelope<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
}

pub type AgentResponse = DataEnvelope<crate::models::Agent>;
pub type ShipNavResponse = DataEnvelope<crate::models::ShipNav>;
pub type WaypointsResponse = PagedEnvelope<crate::models::Waypoint>;
