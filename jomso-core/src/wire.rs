//! JSON shape of a bin as served by static feeds and bundled fixtures.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Bin, BinId, BinKind, FillLevel, GeoPoint, MAX_FILL};
use crate::ports::PortError;

const UNKNOWN_KIND: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Single bin entry of a feed.
pub struct BinRecord {
    /// Feed-unique identifier.
    pub id: String,
    /// Street address or landmark.
    pub address: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Fill percentage; fractional values are rounded.
    pub fill: f64,
    /// Material tag such as "glass" or "clothes".
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Container volume label.
    pub size: String,
    /// RFC 3339 timestamp of the last emptying.
    #[serde(default)]
    pub last_emptied_at: Option<String>,
}

impl TryFrom<BinRecord> for Bin {
    type Error = PortError;

    fn try_from(record: BinRecord) -> Result<Self, Self::Error> {
        let location = GeoPoint::new(record.lat, record.lng).ok_or_else(|| {
            PortError::InvalidBin(format!(
                "bin {} has coordinates out of range ({}, {})",
                record.id, record.lat, record.lng
            ))
        })?;

        let fill = fill_level(record.fill).ok_or_else(|| {
            PortError::InvalidBin(format!(
                "bin {} reports fill level {} outside 0..=100",
                record.id, record.fill
            ))
        })?;

        let kind = record
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map_or_else(|| BinKind::Other(UNKNOWN_KIND.to_owned()), BinKind::from_tag);

        let last_emptied_at = record
            .last_emptied_at
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()?
            .map(|stamp| stamp.with_timezone(&Utc));

        Ok(Self {
            id: BinId(record.id),
            address: record.address,
            location,
            fill,
            kind,
            size: record.size,
            last_emptied_at,
        })
    }
}

/// Round a feed percentage to a whole fill level.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is range-checked before the cast"
)]
fn fill_level(raw: f64) -> Option<FillLevel> {
    let percent = raw.round();
    if !(0.0..=f64::from(MAX_FILL)).contains(&percent) {
        return None;
    }
    FillLevel::new(percent as u8)
}

/// Convert feed records into bins, preserving order.
///
/// # Errors
///
/// Returns [`PortError::InvalidBin`] for a record violating a model invariant or a
/// repeated id, and [`PortError::Parse`] for a malformed timestamp.
pub fn into_bins(records: Vec<BinRecord>) -> Result<Vec<Bin>, PortError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut bins = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id.clone()) {
            return Err(PortError::InvalidBin(format!(
                "duplicate bin id {}",
                record.id
            )));
        }
        bins.push(Bin::try_from(record)?);
    }

    Ok(bins)
}

/// Decode a JSON array of bin records.
///
/// # Errors
///
/// Returns [`PortError::Decode`] for malformed JSON, otherwise whatever
/// [`into_bins`] rejects.
pub fn decode_bins(json: &str) -> Result<Vec<Bin>, PortError> {
    let records: Vec<BinRecord> = serde_json::from_str(json)?;
    into_bins(records)
}
