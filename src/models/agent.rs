use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct Agent {
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
    pub symbol: String,
    pub headquarters: String,
    pub credits: i64,
    #[serde(rename = "startingFaction")]
    pub starting_faction: String,
    #[serde(rename = "shipCount", default)]
    pub ship_count: i32,
}

impl Agent {
    /// One-line status, e.g. `BOB (COSMIC) | HQ X1-DF55-A1 | 175000 credits | 2 ships`.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) | HQ {} | {} credits | {} ships",
            self.symbol, self.starting_faction, self.headquarters, self.credits, self.ship_count
        )
    }
}

/// Body of `POST /v2/register`.
#[derive(Debug, Serialize, Clone)]
pub struct RegisterRequest {
    pub symbol: String,
    pub faction: String,
}
