//! Place search against a Nominatim-compatible geocoder.
//!
//! Nominatim sends coordinates as decimal strings and the bounding box as
//! `[south, north, west, east]`, also strings.

use reqwest::Url;
use serde::{Deserialize, Deserializer};

use crate::error::FetchError;
use crate::viewport::BoundingBox;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const SEARCH_ENDPOINT: &str = "/search";
/// Results shown under the search box.
pub const SEARCH_LIMIT: u8 = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub display_name: String,
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "coordinate")]
    pub lon: f64,
    #[serde(default, rename = "boundingbox")]
    bounding_box: Option<[String; 4]>,
}

impl Place {
    /// Extent of the place, when the geocoder reported a well-formed one.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let raw = self.bounding_box.as_ref()?;
        let mut parsed = [0.0; 4];
        for (slot, value) in parsed.iter_mut().zip(raw) {
            *slot = value.trim().parse().ok()?;
        }
        let [south, north, west, east] = parsed;
        (south <= north && west <= east).then(|| BoundingBox::new(west, south, east, north))
    }
}

/// `GET {base}/search?format=json&limit=5&q={query}`.
pub fn search_url(base: &str, query: &str) -> Result<Url, FetchError> {
    let endpoint = format!("{}{SEARCH_ENDPOINT}", base.trim_end_matches('/'));
    let mut url =
        Url::parse(&endpoint).map_err(|err| FetchError::InvalidUrl(format!("{endpoint}: {err}")))?;
    url.query_pairs_mut()
        .append_pair("format", "json")
        .append_pair("limit", &SEARCH_LIMIT.to_string())
        .append_pair("q", query.trim());
    Ok(url)
}

pub fn decode_places(body: &str) -> Result<Vec<Place>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(number) => Ok(number),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate `{text}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILAN: &str = r#"[
        {
            "place_id": 123,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0.",
            "osm_type": "relation",
            "osm_id": 44915,
            "lat": "45.4641943",
            "lon": "9.1896346",
            "class": "boundary",
            "type": "administrative",
            "display_name": "Milano, Lombardia, Italia",
            "boundingbox": ["45.3867381", "45.5358482", "9.0408867", "9.2781103"]
        },
        {
            "lat": 45.07,
            "lon": 7.68,
            "display_name": "Torino"
        }
    ]"#;

    #[test]
    fn decodes_nominatim_results() {
        let places = decode_places(MILAN).unwrap();
        assert_eq!(places.len(), 2);

        let milan = &places[0];
        assert_eq!(milan.display_name, "Milano, Lombardia, Italia");
        assert!((milan.lat - 45.4641943).abs() < 1e-9);
        assert!((milan.lon - 9.1896346).abs() < 1e-9);
        let bounds = milan.bounds().unwrap();
        assert!((bounds.south - 45.3867381).abs() < 1e-9);
        assert!((bounds.north - 45.5358482).abs() < 1e-9);
        assert!((bounds.west - 9.0408867).abs() < 1e-9);
        assert!((bounds.east - 9.2781103).abs() < 1e-9);

        assert_eq!(places[1].bounds(), None);
    }

    #[test]
    fn empty_answer_is_no_places() {
        assert!(decode_places("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let body = r#"[{"lat": "north", "lon": "9.1", "display_name": "x"}]"#;
        assert!(matches!(decode_places(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn malformed_bounding_box_is_ignored() {
        let body = r#"[{"lat": "1", "lon": "2", "display_name": "x",
                        "boundingbox": ["5", "1", "a", "3"]}]"#;
        let places = decode_places(body).unwrap();
        assert_eq!(places[0].bounds(), None);
    }

    #[test]
    fn search_url_encodes_the_query() {
        let url = search_url("https://nominatim.example.org/", " Piazza del Duomo, Milano ")
            .unwrap();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("format".to_string(), "json".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("q".to_string(), "Piazza del Duomo, Milano".to_string()),
            ]
        );
        assert!(search_url("not a url", "x").is_err());
    }
}
