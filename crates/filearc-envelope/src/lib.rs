//! Versioned JSON envelope model and codec.
//!
//! Every file persisted by the archive is a single UTF-8 JSON document of
//! the shape `{ "metadata": { "archiveFormat", "version" }, "data": ... }`.
//! The metadata block is stamped by the writer from the constants in this
//! crate; callers never supply it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier of the on-disk layout written by this crate.
pub const ARCHIVE_FORMAT: &str = "json-archive.v1";

/// Schema version of the `data` payload.
///
/// Currently a fixed literal rather than caller-supplied.
pub const SCHEMA_VERSION: &str = "v1";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Envelope metadata, written as camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "archiveFormat")]
    pub archive_format: String,
    pub version: String,
}

/// The `{metadata, data}` wrapper persisted per file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub metadata: Metadata,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload, stamping the current format and schema version.
    pub fn new(data: T) -> Self {
        Self {
            metadata: Metadata {
                archive_format: ARCHIVE_FORMAT.to_string(),
                version: SCHEMA_VERSION.to_string(),
            },
            data,
        }
    }
}

/// Serialize an envelope to its on-disk JSON text.
pub fn encode<T: Serialize>(envelope: &Envelope<T>) -> Result<String> {
    serde_json::to_string(envelope).map_err(CodecError::Encode)
}

/// Deserialize an envelope from on-disk JSON text.
///
/// The declared `archiveFormat`/`version` are not validated against the
/// current constants; readers see whatever the writer stamped.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<Envelope<T>> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
