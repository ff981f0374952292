use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Response body exceeded {capacity} byte buffer ({} bytes kept)", .partial.len())]
    TruncatedResponse { capacity: usize, partial: Vec<u8> },

    #[error("Failed reading response body: {0}")]
    Read(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No candidate waypoints to choose from")]
    NoCandidate,

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{operation}: {source}")]
    Operation {
        operation: String,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Strips every `Operation` layer and returns the underlying failure.
    pub fn root_cause(&self) -> &ClientError {
        let mut current = self;
        while let ClientError::Operation { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(e: toml::de::Error) -> Self {
        ClientError::Config(format!("Config parse error: {}", e))
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(e: toml::ser::Error) -> Self {
        ClientError::Config(format!("Config write error: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Tags an error with the name of the operation that produced it.
pub trait OperationContext<T> {
    fn during(self, operation: &str) -> Result<T>;
}

impl<T> OperationContext<T> for Result<T> {
    fn during(self, operation: &str) -> Result<T> {
        self.map_err(|e| ClientError::Operation {
            operation: operation.to_string(),
            source: Box::new(e),
        })
    }
}
