//! Background tile layer resilience.
//!
//! Candidate tile providers are tried in ranked order; a provider that
//! errors too fast or never serves a tile is abandoned for the next one.
//! When every candidate is exhausted, a known-reliable provider is
//! attached with a visual darkening overlay instead of relying on native
//! dark styling. The map is never left without a background layer.

pub mod cascade;
pub mod providers;

pub use cascade::{CascadeConfig, CascadeState, LayerCommand, TileCascade, TileEvent};
pub use providers::TileProvider;
