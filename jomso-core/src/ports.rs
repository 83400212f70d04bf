//! Traits describing bin and location producers, plus the shared error type.

use async_trait::async_trait;
use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{Bin, GeoPoint, SourceMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading bins or locating the user.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Bin list was not valid JSON or did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// Failed to parse a timestamp from a bin record.
    #[error("Parse error: {0}")]
    Parse(#[from] ChronoParseError),
    /// A bin record violated a model invariant.
    #[error("Invalid bin: {0}")]
    InvalidBin(String),
    /// No source is registered under the requested id.
    #[error("Unknown source")]
    UnknownSource,
}

#[async_trait]
/// Producer of the bin list, either bundled or fetched remotely.
pub trait BinSource: Send + Sync {
    /// Metadata describing this source.
    fn meta(&self) -> &SourceMeta;

    /// Load every bin the source knows about, in source order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the bins cannot be fetched or fail validation.
    async fn bins(&self) -> Result<Vec<Bin>, PortError>;
}

#[async_trait]
/// Device location service.
pub trait LocationPort: Send + Sync {
    /// Current user position, or `None` when permission is denied or no fix is available.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the location backend itself fails.
    async fn current_location(&self) -> Result<Option<GeoPoint>, PortError>;
}
