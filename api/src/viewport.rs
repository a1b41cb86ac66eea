use reqwest::Url;

use crate::error::FetchError;

pub const DATA_ENDPOINT: &str = "/api/getData";

/// Geographic rectangle in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.west..=self.east).contains(&lon) && (self.south..=self.north).contains(&lat)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }
}

/// Snapshot of what a data request covers: the visible box plus the tag filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Viewport {
    pub bounds: BoundingBox,
    filter: Option<String>,
}

impl Viewport {
    /// Blank filter text means "no filter".
    pub fn new(bounds: BoundingBox, filter: &str) -> Self {
        let filter = (!filter.trim().is_empty()).then(|| filter.to_string());
        Self { bounds, filter }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// `GET {base}/api/getData?minx&miny&maxx&maxy[&filter]`
    pub fn data_url(&self, base: &str) -> Result<Url, FetchError> {
        let endpoint = format!("{}{DATA_ENDPOINT}", base.trim_end_matches('/'));
        let mut url =
            Url::parse(&endpoint).map_err(|err| FetchError::InvalidUrl(format!("{endpoint}: {err}")))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("minx", &self.bounds.west.to_string())
                .append_pair("miny", &self.bounds.south.to_string())
                .append_pair("maxx", &self.bounds.east.to_string())
                .append_pair("maxy", &self.bounds.north.to_string());
            if let Some(filter) = self.filter() {
                query.append_pair("filter", filter);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milan() -> BoundingBox {
        BoundingBox::new(9.188, 45.4635, 9.1926, 45.465)
    }

    #[test]
    fn url_carries_bounds_in_order() {
        let url = Viewport::new(milan(), "")
            .data_url("http://localhost:8000/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/getData?minx=9.188&miny=45.4635&maxx=9.1926&maxy=45.465"
        );
    }

    #[test]
    fn blank_filter_is_omitted() {
        let viewport = Viewport::new(milan(), "   ");
        assert_eq!(viewport.filter(), None);
        let url = viewport.data_url("https://example.org").unwrap();
        assert!(!url.as_str().contains("filter"));
    }

    #[test]
    fn filter_is_encoded() {
        let url = Viewport::new(milan(), "amenity=bench")
            .data_url("https://example.org")
            .unwrap();
        let filter = url
            .query_pairs()
            .find(|(key, _)| key == "filter")
            .map(|(_, value)| value.into_owned());
        assert_eq!(filter.as_deref(), Some("amenity=bench"));
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(matches!(
            Viewport::new(milan(), "").data_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = milan();
        assert!(bounds.contains(9.188, 45.465));
        assert!(!bounds.contains(9.2, 45.464));
    }
}
