use serde::{Deserialize, Serialize};

/// Position in a system's 2D plane.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Waypoint {
    pub symbol: String,
    #[serde(flatten)]
    pub location: Coordinate,
    #[serde(rename = "type", default)]
    pub waypoint_type: String,
    #[serde(rename = "systemSymbol", default)]
    pub system_symbol: String,
    #[serde(default)]
    pub traits: Vec<Trait>,
}

impl Waypoint {
    pub fn new(symbol: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            symbol: symbol.into(),
            location: Coordinate::new(x, y),
            waypoint_type: String::new(),
            system_symbol: String::new(),
            traits: Vec::new(),
        }
    }

    pub fn has_trait(&self, trait_symbol: &str) -> bool {
        self.traits.iter().any(|t| t.symbol == trait_symbol)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Trait {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
