//! Hierarchical place listing as served by `/filter/places`.
//!
//! The backend reports continents → countries → states → counties; the
//! world dataset only needs the flattened country-name set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceState {
    pub name: String,
    #[serde(default)]
    pub county: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCountry {
    pub name: String,
    #[serde(default)]
    pub state: Vec<PlaceState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceContinent {
    pub name: String,
    #[serde(default)]
    pub country: Vec<PlaceCountry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceTree {
    #[serde(default)]
    pub place: Vec<PlaceContinent>,
}

impl PlaceTree {
    /// Flattened, deduplicated, alphabetically sorted country names.
    pub fn countries(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .place
            .iter()
            .flat_map(|continent| continent.country.iter())
            .map(|country| country.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
