/// An inbound payload that could not be decoded into its expected type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode payload: {0}")]
pub struct DecodingError(pub String);

impl From<serde_json::Error> for DecodingError {
    fn from(e: serde_json::Error) -> Self {
        Self(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The renderer has no loaded document to run scripts against.
    #[error("renderer not ready")]
    TransportUnavailable,

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error("script execution failed: {0}")]
    Script(String),

    #[error("no endpoint allocated for event '{0}'")]
    UnboundEndpoint(&'static str),

    #[error("malformed query frame: {0}")]
    MalformedFrame(String),
}

impl From<wry::Error> for BusError {
    fn from(e: wry::Error) -> Self {
        Self::Script(e.to_string())
    }
}
