//! Domain data structures for bins, their positions, and the sources that list them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest fill percentage a bin can report.
pub const MAX_FILL: u8 = 100;
/// Bins above this fill percentage count as full.
pub const FULL_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Position on the globe in decimal degrees.
pub struct GeoPoint {
    /// Latitude, expected within `-90..=90`.
    pub latitude: f64,
    /// Longitude, expected within `-180..=180`.
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, returning `None` when either coordinate is out of range or not finite.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.is_valid().then_some(point)
    }

    /// Check whether both coordinates are finite and within their ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a bin, unique within one source.
pub struct BinId(pub String);

impl fmt::Display for BinId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Material a bin accepts.
pub enum BinKind {
    /// Glass container.
    Glass,
    /// Used clothes collection.
    Clothes,
    /// Paper and cardboard.
    Paper,
    /// Plastics and light packaging.
    Plastic,
    /// Anything the source labels differently.
    Other(String),
}

impl BinKind {
    /// Map a source type tag to a kind, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_tag(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "glass" => Self::Glass,
            "clothes" => Self::Clothes,
            "paper" => Self::Paper,
            "plastic" => Self::Plastic,
            _ => Self::Other(raw.trim().to_owned()),
        }
    }
}

impl fmt::Display for BinKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Glass => "glass",
            Self::Clothes => "clothes",
            Self::Paper => "paper",
            Self::Plastic => "plastic",
            Self::Other(name) => name.as_str(),
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// How urgently a bin should be emptied.
pub enum Priority {
    /// Can wait for the regular round.
    Low,
    /// Should be emptied soon.
    Medium,
    /// Needs emptying on the next round.
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Fill percentage of a bin, always within `0..=100`.
pub struct FillLevel(u8);

impl FillLevel {
    /// Build a fill level, returning `None` above 100 %.
    #[must_use]
    pub fn new(percent: u8) -> Option<Self> {
        (percent <= MAX_FILL).then_some(Self(percent))
    }

    /// Percentage value.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// True when the bin is above the full threshold.
    #[must_use]
    pub fn is_full(self) -> bool {
        self.0 > FULL_THRESHOLD
    }

    /// Collection priority derived from the fill level.
    #[must_use]
    pub fn priority(self) -> Priority {
        match self.0 {
            85.. => Priority::High,
            60..=84 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl TryFrom<u8> for FillLevel {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent).ok_or_else(|| format!("fill level {percent} exceeds {MAX_FILL}"))
    }
}

impl From<FillLevel> for u8 {
    fn from(level: FillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FillLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Public waste or recycling container.
pub struct Bin {
    /// Unique identifier within the source.
    pub id: BinId,
    /// Street address or landmark description.
    pub address: String,
    /// Where the bin stands.
    pub location: GeoPoint,
    /// How full the bin currently is.
    pub fill: FillLevel,
    /// Material the bin accepts.
    pub kind: BinKind,
    /// Container volume as shown to users, e.g. “2.5 m³”.
    pub size: String,
    /// Last time the bin was emptied, if known.
    pub last_emptied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a registered bin source.
pub struct SourceId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a bin source and its human-friendly name.
pub struct SourceMeta {
    /// Unique identifier.
    pub id: SourceId,
    /// Display name.
    pub name: String,
}
