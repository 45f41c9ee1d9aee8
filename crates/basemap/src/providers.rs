/// A raster tile provider, treated as a black box: the cascade only ever
/// observes per-tile success/error events and aggregate load counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProvider {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
}

impl TileProvider {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
        }
    }

    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Dark-styled candidates, most preferred first.
pub fn default_candidates() -> Vec<TileProvider> {
    vec![
        TileProvider::new(
            "carto-dark",
            "https://basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors © CARTO",
        ),
        TileProvider::new(
            "stadia-dark",
            "https://tiles.stadiamaps.com/tiles/alidade_smooth_dark/{z}/{x}/{y}.png",
            "© Stadia Maps © OpenStreetMap contributors",
        ),
        TileProvider::new(
            "esri-dark-gray",
            "https://services.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Dark_Gray_Base/MapServer/tile/{z}/{y}/{x}",
            "© Esri",
        ),
        TileProvider::new(
            "carto-dark-nolabels",
            "https://basemaps.cartocdn.com/dark_nolabels/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors © CARTO",
        ),
    ]
}

/// Reliable terminal fallback; dark styling comes from an overlay filter
/// rather than the provider itself.
pub fn fallback_provider() -> TileProvider {
    TileProvider::new(
        "osm-standard",
        "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        "© OpenStreetMap contributors",
    )
}

#[cfg(test)]
mod tests {
    use super::{default_candidates, fallback_provider, TileProvider};

    #[test]
    fn tile_url_substitutes_all_axes() {
        let provider = TileProvider::new("t", "https://t.example/{z}/{x}/{y}.png", "");
        assert_eq!(provider.tile_url(3, 4, 5), "https://t.example/3/4/5.png");
    }

    #[test]
    fn fallback_is_not_a_candidate() {
        let fallback = fallback_provider();
        assert!(default_candidates().iter().all(|c| c.name != fallback.name));
    }
}
