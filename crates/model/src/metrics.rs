//! Case-metric wire shapes and derived presentation types.
//!
//! `DataPoint` is the backend's response shape and is immutable once
//! received; everything else is derived per query and discarded with it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One response from the backend's `/filter/data` endpoint.
///
/// Either `date` (single-day query) or `date_range` (range-aggregate query)
/// is set, never both. Missing counters deserialize as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
}

/// Aggregate counters over a date range and an optional place scope.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl From<&DataPoint> for Totals {
    fn from(point: &DataPoint) -> Self {
        Self {
            confirmed: point.confirmed,
            deaths: point.deaths,
            recovered: point.recovered,
        }
    }
}

/// One time-series sample. Chronological ordering is significant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, totals: Totals) -> Self {
        Self {
            date,
            confirmed: totals.confirmed,
            deaths: totals.deaths,
            recovered: totals.recovered,
        }
    }
}

/// One leaderboard row, ranked descending by `confirmed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub place: String,
    pub confirmed: u64,
    pub deaths: u64,
}

impl LeaderboardEntry {
    /// Sort descending by `confirmed`.
    ///
    /// `sort_by` is stable, so equal counts keep their input order; that
    /// tie-break is part of the contract, not an accident.
    pub fn rank(entries: &mut [LeaderboardEntry]) {
        entries.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
    }
}

/// Geographic coordinate in WGS84 degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One map marker derived from totals plus a resolved coordinate.
///
/// Places with no resolvable coordinate are omitted entirely, never mapped
/// to a default location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub value: u64,
    pub deaths: u64,
    pub place: String,
}

/// A named geographic scope: a single country, or the synthetic aggregate
/// scope covering every place the backend knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Place {
    World,
    Country(String),
}

impl Place {
    /// Parse a user-facing place argument; absent or "World" means the
    /// aggregate scope.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Place::World,
            Some(name) if name.eq_ignore_ascii_case("world") => Place::World,
            Some(name) => Place::Country(name.to_string()),
        }
    }

    /// Value for the backend's `country` query parameter; the aggregate
    /// scope sends none.
    pub fn country(&self) -> Option<&str> {
        match self {
            Place::World => None,
            Place::Country(name) => Some(name),
        }
    }

    /// Stable cache-key token. The aggregate scope uses the `_all` sentinel
    /// so it never collides with a real country name.
    pub fn cache_token(&self) -> &str {
        match self {
            Place::World => "_all",
            Place::Country(name) => name,
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Place::World => write!(f, "World"),
            Place::Country(name) => write!(f, "{name}"),
        }
    }
}
