//! Marker popup content: feature facts plus links into openstreetmap.org.

use api::Feature;

use crate::core::format::format_date;
use crate::core::location::MapLocation;

const OSM_SITE: &str = "https://www.openstreetmap.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmLinks {
    /// Opens the editor on the current view.
    pub edit: String,
    pub history: String,
    pub details: String,
}

impl OsmLinks {
    pub fn for_feature(feature: &Feature, location: &MapLocation) -> Self {
        let kind = feature.kind().osm_type();
        let id = feature.id();
        Self {
            edit: format!("{OSM_SITE}/edit?{kind}={id}#map={}", location.to_hash()),
            history: format!("{OSM_SITE}/{kind}/{id}/history"),
            details: format!("{OSM_SITE}/{kind}/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupInfo {
    pub title: String,
    pub last_edit: String,
    pub created: String,
    pub version: u64,
    pub links: OsmLinks,
}

impl PopupInfo {
    pub fn new(feature: &Feature, location: &MapLocation) -> Self {
        let properties = &feature.properties;
        Self {
            title: format!("{} {}", feature.kind().osm_type(), feature.id()),
            last_edit: format_date(properties.lastedit),
            created: format_date(properties.created),
            version: properties.version,
            links: OsmLinks::for_feature(feature, location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::FeatureCollection;

    fn collection() -> FeatureCollection {
        FeatureCollection::from_json(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[9.19,45.46]},
                 "properties":{"id":42,"created":"2011-02-03T04:05:06Z","lastedit":"2021-06-07T08:09:10Z",
                               "version":7,"average_update_days":120.5}},
                {"type":"Feature","geometry":{"type":"LineString","coordinates":[[9.1,45.4],[9.2,45.5]]},
                 "properties":{"id":"77","created":"2009-01-01","lastedit":"2019-01-01",
                               "version":3,"average_update_days":800}}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn node_links_carry_current_view() {
        let features = collection();
        let location = MapLocation::new(18, 45.46423, 9.19073);
        let links = OsmLinks::for_feature(&features.features[0], &location);
        assert_eq!(
            links.edit,
            "https://www.openstreetmap.org/edit?node=42#map=18/45.46423/9.19073"
        );
        assert_eq!(links.history, "https://www.openstreetmap.org/node/42/history");
        assert_eq!(links.details, "https://www.openstreetmap.org/node/42");
    }

    #[test]
    fn non_point_geometry_links_to_way() {
        let features = collection();
        let info = PopupInfo::new(&features.features[1], &MapLocation::default());
        assert_eq!(info.title, "way 77");
        assert_eq!(info.links.details, "https://www.openstreetmap.org/way/77");
        assert_eq!(info.last_edit, "2019-01-01");
        assert_eq!(info.created, "2009-01-01");
        assert_eq!(info.version, 3);
    }
}
