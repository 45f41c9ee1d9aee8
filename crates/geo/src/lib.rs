//! Place-name → coordinate resolution.
//!
//! Resolution is layered: an optional backend-supplied primary table wins,
//! then the static fallback table, then alias redirection, then a
//! normalized (punctuation- and case-insensitive) comparison. A miss means
//! "omit from the map", never "use a default location".

mod tables;

use std::collections::HashMap;

use model::Coordinate;

use crate::tables::{ALIASES, FALLBACK_COORDS};

// Alias chains are short ("United States" → "USA" → "US"); the hop cap only
// guards against an accidental cycle in the table.
const MAX_ALIAS_HOPS: usize = 3;

/// Resolve a place name against `primary` and the static tables.
///
/// First match wins:
/// 1. exact key in `primary`
/// 2. exact key in the static fallback table
/// 3. alias redirection, re-resolved against `primary` then the fallback
/// 4. normalized match against `primary`, the fallback, then the alias keys
pub fn resolve(name: &str, primary: &HashMap<String, Coordinate>) -> Option<Coordinate> {
    if let Some(coord) = resolve_exact(name, primary) {
        return Some(coord);
    }

    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }

    if let Some(coord) = primary
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(_, coord)| *coord)
    {
        return Some(coord);
    }
    if let Some(coord) = FALLBACK_COORDS
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(_, coord)| *coord)
    {
        return Some(coord);
    }
    ALIASES
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .and_then(|(_, canonical)| resolve_exact(canonical, primary))
}

/// Exact lookup in `primary`, then the fallback table, following alias
/// redirections.
fn resolve_exact(name: &str, primary: &HashMap<String, Coordinate>) -> Option<Coordinate> {
    let mut key = name;
    for _ in 0..=MAX_ALIAS_HOPS {
        if let Some(coord) = primary.get(key) {
            return Some(*coord);
        }
        if let Some(coord) = FALLBACK_COORDS.get(key) {
            return Some(*coord);
        }
        match ALIASES.get(key) {
            Some(canonical) => key = canonical,
            None => return None,
        }
    }
    None
}

/// Strip every non-alphanumeric character and lowercase the rest.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
