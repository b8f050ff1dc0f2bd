//! Payload (de)serialization.
//!
//! Every payload crosses the boundary as a single JSON string, so this is
//! the only place where host types meet wire text. Types opt in through
//! [`Payload`]; there is no runtime type lookup.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::error::DecodingError;

/// A type that may travel over the bus as a payload.
///
/// Implemented explicitly per message type in [`crate::messages`].
pub trait Payload: Serialize + DeserializeOwned {}

/// Canonical compact JSON for `value`.
///
/// Field order follows declaration order, so equal values always produce
/// identical text.
pub fn serialize<T: Payload>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        // Only reachable for hand-written Serialize impls that error out
        error!(error = %e, "payload serialization failed");
        "null".to_string()
    })
}

/// Parse `text` into `T`. Unknown fields are ignored.
pub fn deserialize<T: Payload>(text: &str) -> Result<T, DecodingError> {
    Ok(serde_json::from_str(text)?)
}
