use thiserror::Error;

/// Everything that can stop a load or a render pass.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to fetch geodata: {0}")]
    Fetch(#[from] gloo_net::Error),

    #[error("geodata request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse geodata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid topology: {0}")]
    Topology(String),

    #[error("feature group '{0}' is missing from the geodata")]
    MissingGroup(String),

    #[error("feature {index} in group '{group}' has no geometry")]
    MissingGeometry { group: String, index: usize },

    #[error("feature {index} in group '{group}' has no identifier to label")]
    MissingIdentifier { group: String, index: usize },

    #[error("feature {index} in group '{group}' has an empty geometry")]
    EmptyGeometry { group: String, index: usize },
}

pub type Result<T> = std::result::Result<T, MapError>;
