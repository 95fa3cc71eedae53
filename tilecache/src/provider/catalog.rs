//! Built-in tile provider catalog.

use super::types::TileProvider;

const OSM_ATTRIBUTION: &str = "Maps and Data (c) openstreetmap.org and contributors, ODbL";

/// Returns every built-in provider, in display order.
///
/// The list is rebuilt on each call; callers that need it repeatedly should
/// keep the returned `Vec` and pass it around.
///
/// Providers that need credentials (see [`TileProvider::here`]) are not part
/// of the catalog.
pub fn all_providers() -> Vec<TileProvider> {
    vec![
        TileProvider::open_street_maps(),
        TileProvider::open_cycle_map(),
        TileProvider::thunderforest("landscape"),
        TileProvider::thunderforest("outdoors"),
        TileProvider::thunderforest("transport"),
        TileProvider::stamen("toner"),
        TileProvider::stamen("terrain"),
        TileProvider::open_topo_map(),
        TileProvider::wikimedia(),
        TileProvider::carto("light"),
        TileProvider::carto("dark"),
        TileProvider::arcgis_world_imagery(),
    ]
}

/// Finds a built-in provider by name (case-insensitive).
pub fn lookup(name: &str) -> Option<TileProvider> {
    all_providers()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Names of all built-in providers, in catalog order.
pub fn provider_names() -> Vec<String> {
    all_providers().into_iter().map(|p| p.name).collect()
}

impl TileProvider {
    /// OpenStreetMap standard tiles.
    pub fn open_street_maps() -> Self {
        TileProvider::new(
            "osm",
            OSM_ATTRIBUTION,
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        )
        .with_shards(["a", "b", "c"])
    }

    /// OpenCycleMap.
    pub fn open_cycle_map() -> Self {
        TileProvider::new(
            "cycle",
            "Maps and Data (c) openstreetmaps.org and contributors, ODbL",
            "http://{s}.tile.opencyclemap.org/cycle/{z}/{x}/{y}.png",
        )
        .with_shards(["a", "b"])
    }

    /// Thunderforest styles (`landscape`, `outdoors`, `transport`).
    pub fn thunderforest(style: &str) -> Self {
        TileProvider::new(
            format!("thunderforest-{}", style),
            "Maps (c) Thundeforest; Data (c) OSM and contributors, ODbL",
            format!("https://{{s}}.tile.thunderforest.com/{}/{{z}}/{{x}}/{{y}}.png", style),
        )
        .with_shards(["a", "b", "c"])
    }

    /// Stamen styles (`toner`, `terrain`).
    pub fn stamen(style: &str) -> Self {
        TileProvider::new(
            format!("stamen-{}", style),
            "Maps (c) Stamen; Data (c) OSM and contributors, ODbL",
            format!("http://{{s}}.tile.stamen.com/{}/{{z}}/{{x}}/{{y}}.png", style),
        )
        .with_shards(["a", "b", "c", "d"])
    }

    /// OpenTopoMap.
    pub fn open_topo_map() -> Self {
        TileProvider::new(
            "opentopomap",
            "Maps (c) OpenTopoMap [CC-BY-SA]; Data (c) OSM and contributors [ODbL]; Data (c) SRTM",
            "http://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        )
        .with_shards(["a", "b", "c"])
    }

    /// Wikimedia maps. Single host, no shards.
    pub fn wikimedia() -> Self {
        TileProvider::new(
            "wikimedia",
            "Map (c) Wikimedia; Data (c) OSM and contributors, ODbL.",
            "https://maps.wikimedia.org/osm-intl/{z}/{x}/{y}.png",
        )
    }

    /// Carto basemaps (`light`, `dark`).
    pub fn carto(variant: &str) -> Self {
        TileProvider::new(
            format!("carto-{}", variant),
            "Map (c) Carto [CC BY 3.0] Data (c) OSM and contributors, ODbL.",
            format!(
                "https://cartodb-basemaps-{{s}}.global.ssl.fastly.net/{}_all/{{z}}/{{x}}/{{y}}.png",
                variant
            ),
        )
        .with_shards(["a", "b", "c", "d"])
    }

    /// Esri World Imagery. Note the `{y}/{x}` order in the URL.
    pub fn arcgis_world_imagery() -> Self {
        TileProvider::new(
            "arcgis-worldimagery",
            "Source: Esri, Maxar, GeoEye, Earthstar Geographics, CNES/Airbus DS, USDA, USGS, AeroGRID, IGN, and the GIS User Community",
            "https://server.arcgisonline.com/arcgis/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        )
    }

    /// HERE map tiles (512px), requires an app id and code.
    ///
    /// Use `map_id = "newest"` for the latest tiles. Cached tiles are not
    /// versioned, so a cache used with `newest` should be cleared
    /// periodically or maps may mix old and new tiles.
    ///
    /// # Arguments
    ///
    /// * `map_id` - Map version hash or `newest`
    /// * `scheme` - Map scheme, e.g. `normal.day`
    /// * `ppi` - 72 for normal output, 320 for 2x
    /// * `app_id` / `app_code` - HERE credentials
    pub fn here(map_id: &str, scheme: &str, ppi: u32, app_id: &str, app_code: &str) -> Self {
        TileProvider::new(
            "here",
            "here.com",
            format!(
                "https://{{s}}.base.maps.cit.api.here.com/maptile/2.1/maptile/{}/{}/{{z}}/{{x}}/{{y}}/512/png?ppi={}&app_id={}&app_code={}",
                map_id, scheme, ppi, app_id, app_code
            ),
        )
        .with_tile_size(512)
        .with_shards(["1", "2", "3", "4"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::validate_provider_name;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_unique() {
        let names = provider_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_catalog_order() {
        let names = provider_names();
        assert_eq!(names.first().map(String::as_str), Some("osm"));
        assert_eq!(
            names.last().map(String::as_str),
            Some("arcgis-worldimagery")
        );
    }

    #[test]
    fn test_catalog_names_are_cache_safe() {
        for provider in all_providers() {
            assert!(validate_provider_name(&provider.name).is_ok());
        }
    }

    #[test]
    fn test_every_pattern_has_coordinates() {
        for provider in all_providers() {
            for placeholder in ["{z}", "{x}", "{y}"] {
                assert!(
                    provider.url_pattern.contains(placeholder),
                    "{} missing {}",
                    provider.name,
                    placeholder
                );
            }
            assert_eq!(
                provider.url_pattern.contains("{s}"),
                !provider.shards.is_empty(),
                "{} shard placeholder does not match shard list",
                provider.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        let osm = lookup("osm").unwrap();
        assert_eq!(osm.shards, vec!["a", "b", "c"]);
        assert_eq!(osm.tile_size, 256);
        assert!(lookup("OSM").is_some());
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_thunderforest_url() {
        let provider = lookup("thunderforest-outdoors").unwrap();
        assert_eq!(
            provider.url("b", 5, 10, 12),
            "https://b.tile.thunderforest.com/outdoors/5/10/12.png"
        );
    }

    #[test]
    fn test_carto_url() {
        let provider = lookup("carto-dark").unwrap();
        assert_eq!(
            provider.url("c", 2, 1, 0),
            "https://cartodb-basemaps-c.global.ssl.fastly.net/dark_all/2/1/0.png"
        );
    }

    #[test]
    fn test_arcgis_url_swaps_x_and_y() {
        let provider = lookup("arcgis-worldimagery").unwrap();
        assert!(provider.shards.is_empty());
        assert!(provider.tile_url(15, 200, 100).ends_with("/tile/15/100/200"));
    }

    #[test]
    fn test_here_provider() {
        let provider = TileProvider::here("newest", "normal.day", 320, "id", "code");
        assert_eq!(provider.name, "here");
        assert_eq!(provider.tile_size, 512);
        assert_eq!(
            provider.url("2", 4, 5, 6),
            "https://2.base.maps.cit.api.here.com/maptile/2.1/maptile/newest/normal.day/4/5/6/512/png?ppi=320&app_id=id&app_code=code"
        );
        assert!(lookup("here").is_none());
    }
}
