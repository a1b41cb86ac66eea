//! The explorer's single context object.
//!
//! Everything the widgets read or change lives here: map location, active mode,
//! cluster percentile, filter, background saturation, the fetch controller and the
//! published score sheet. Components hold it in a `Signal<ExplorerState>` and talk
//! to it only through these methods.

use std::rc::Rc;

use api::{BoundingBox, Feature, FeatureCollection, FeatureRef, FetchError, Place, Url};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::error::AnalysisError;
use crate::core::location::{MapLocation, MAX_ZOOM};
use crate::fetch::{Completion, FetchController, FetchState, FetchTicket, LoadedData, SessionId};
use crate::staleness::cluster::{validate_percentile, DEFAULT_PERCENTILE};
use crate::staleness::{
    aggregate, aggregate_colors, score, viridis, Color, Extreme, Legend, Mode, ScoreSheet,
};

use super::clustering::{cluster_markers, GridOptions, MapGlyph, Marker};
use super::popup::PopupInfo;
use super::projection::Projection;
use super::search::{place_location, PlaceSearch, SearchId, SearchTicket};

/// Background slider range; the map tiles are drawn with `grayscale(100 - value)%`.
pub const MAX_SATURATION: u8 = 100;

#[derive(Debug, Clone)]
pub struct ExplorerState {
    config: AppConfig,
    location: MapLocation,
    mode: Mode,
    percentile: u32,
    background_saturation: u8,
    controller: FetchController,
    sheet: Rc<ScoreSheet>,
    selected: Option<FeatureRef>,
    search: PlaceSearch,
}

impl ExplorerState {
    pub fn new(config: AppConfig) -> Self {
        let location = config.start;
        Self::with_location(config, location)
    }

    /// Starts from a shared `zoom/lat/lon` hash when it parses, the configured start otherwise.
    pub fn restore(config: AppConfig, hash: Option<&str>) -> Self {
        let location = hash
            .and_then(MapLocation::from_hash)
            .unwrap_or(config.start);
        Self::with_location(config, location)
    }

    fn with_location(config: AppConfig, location: MapLocation) -> Self {
        let percentile = validate_percentile(config.percentile).unwrap_or(DEFAULT_PERCENTILE);
        let mut state = Self {
            controller: FetchController::new(config.api_base.clone()),
            mode: config.mode,
            sheet: Rc::new(ScoreSheet::empty(config.mode)),
            percentile,
            background_saturation: 0,
            selected: None,
            search: PlaceSearch::new(config.geocoder_url.clone()),
            location,
            config,
        };
        state.set_location(location);
        state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn location(&self) -> MapLocation {
        self.location
    }

    pub fn projection(&self) -> Projection {
        Projection::new(
            self.location,
            self.config.canvas_width,
            self.config.canvas_height,
        )
    }

    /// Moves the map. The controller's viewport follows eagerly; no request is made.
    pub fn set_location(&mut self, location: MapLocation) {
        self.location = location;
        let bounds = self.projection().bounds();
        self.controller.update_viewport(bounds);
    }

    pub fn zoom_by(&mut self, delta: i8) {
        self.set_location(self.location.zoom_by(delta));
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let next = self.projection().pan(dx, dy);
        self.set_location(next);
    }

    /// What the next request would cover.
    pub fn viewport_bounds(&self) -> BoundingBox {
        self.controller.current_viewport().bounds
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        debug!(%mode, "switching mode");
        self.mode = mode;
        self.rescore();
    }

    /// Unknown names are rejected and leave the active mode untouched.
    pub fn set_mode_name(&mut self, name: &str) -> Result<(), AnalysisError> {
        let mode = Mode::from_name(name)?;
        self.set_mode(mode);
        Ok(())
    }

    pub fn percentile(&self) -> u32 {
        self.percentile
    }

    pub fn set_percentile(&mut self, percentile: u32) -> Result<(), AnalysisError> {
        self.percentile = validate_percentile(percentile)?;
        Ok(())
    }

    pub fn filter(&self) -> &str {
        self.controller.filter()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.controller.set_filter(filter);
    }

    pub fn background_saturation(&self) -> u8 {
        self.background_saturation
    }

    pub fn set_background_saturation(&mut self, value: u8) {
        self.background_saturation = value.min(MAX_SATURATION);
    }

    /// CSS `grayscale()` percentage for the base map.
    pub fn background_grayscale(&self) -> u8 {
        MAX_SATURATION - self.background_saturation
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.controller.state()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.controller.error_message()
    }

    pub fn begin_fetch(&mut self) -> Result<FetchTicket, FetchError> {
        self.controller.begin()
    }

    /// Applies a completed request. A published collection is scored right away and
    /// replaces the previous sheet in one step.
    pub fn finish_fetch(
        &mut self,
        session: SessionId,
        outcome: Result<FeatureCollection, FetchError>,
    ) -> Completion {
        let completion = self.controller.complete(session, outcome);
        if completion == Completion::Published {
            self.selected = None;
            self.rescore();
        }
        completion
    }

    pub fn dismiss_error(&mut self) {
        self.controller.acknowledge_error();
    }

    pub fn loaded(&self) -> Option<&LoadedData> {
        self.controller.loaded()
    }

    /// Area of the collection currently shown, drawn as the request boundary.
    pub fn loaded_bounds(&self) -> Option<BoundingBox> {
        self.loaded().map(|data| data.viewport.bounds)
    }

    pub fn download_url(&self) -> Option<&Url> {
        self.controller.download_url()
    }

    fn rescore(&mut self) {
        let sheet = match self.controller.loaded() {
            Some(data) => score(&data.collection, self.mode),
            None => ScoreSheet::empty(self.mode),
        };
        info!(mode = %self.mode, scored = sheet.len(), "score sheet rebuilt");
        self.sheet = Rc::new(sheet);
    }

    pub fn score_sheet(&self) -> Rc<ScoreSheet> {
        Rc::clone(&self.sheet)
    }

    pub fn color_of(&self, feature: &FeatureRef) -> Option<Color> {
        self.sheet.color_of(feature)
    }

    pub fn score_of(&self, feature: &FeatureRef) -> Option<f64> {
        self.sheet.score_of(feature)
    }

    /// Representative colour of a cluster given its members' scores.
    pub fn cluster_color(&self, member_scores: &[f64]) -> Result<Color, AnalysisError> {
        aggregate(member_scores, self.percentile).map(viridis)
    }

    /// Same as `cluster_color` for hosts that only know the members' fill colours.
    pub fn cluster_color_from_colors(&self, member_colors: &[Color]) -> Result<Color, AnalysisError> {
        aggregate_colors(&self.sheet, member_colors, self.percentile)
    }

    pub fn worst(&self) -> Option<&Extreme> {
        self.sheet.worst()
    }

    pub fn best(&self) -> Option<&Extreme> {
        self.sheet.best()
    }

    pub fn legend(&self, now: OffsetDateTime) -> Legend {
        self.sheet.legend(now)
    }

    /// Every scored feature with a position, projected on the current canvas.
    pub fn markers(&self) -> Vec<Marker> {
        let Some(data) = self.loaded() else {
            return Vec::new();
        };
        let projection = self.projection();
        data.collection
            .iter()
            .filter_map(|feature| {
                let (lon, lat) = feature.anchor()?;
                let entry = self.sheet.entry(&feature.reference())?;
                let (x, y) = projection.project(lon, lat);
                Some(Marker {
                    feature: entry.feature.clone(),
                    lon,
                    lat,
                    x,
                    y,
                    color: entry.color,
                    score: entry.score,
                })
            })
            .collect()
    }

    pub fn glyphs(&self) -> Result<Vec<MapGlyph>, AnalysisError> {
        let options = GridOptions {
            cell_px: self.config.cluster_cell_px,
            disable_at_zoom: self.config.disable_clustering_at_zoom,
            percentile: self.percentile,
        };
        cluster_markers(self.markers(), self.location.zoom, options)
    }

    pub fn feature(&self, target: &FeatureRef) -> Option<&Feature> {
        self.loaded()?.collection.find(target)
    }

    pub fn selected(&self) -> Option<&FeatureRef> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, target: Option<FeatureRef>) {
        self.selected = target.filter(|target| self.sheet.entry(target).is_some());
    }

    pub fn popup(&self) -> Option<PopupInfo> {
        let feature = self.feature(self.selected.as_ref()?)?;
        Some(PopupInfo::new(feature, &self.location))
    }

    pub fn search(&self) -> &PlaceSearch {
        &self.search
    }

    pub fn begin_search(&mut self, query: &str) -> Result<Option<SearchTicket>, FetchError> {
        self.search.begin(query)
    }

    pub fn finish_search(
        &mut self,
        search: SearchId,
        outcome: Result<Vec<Place>, FetchError>,
    ) -> bool {
        self.search.complete(search, outcome)
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Where the map goes when a search result is picked.
    pub fn place_location(&self, place: &Place) -> MapLocation {
        place_location(place, self.config.canvas_width, self.config.canvas_height)
    }

    /// Centres the map on a feature at maximum zoom and opens its popup.
    pub fn fly_to(&mut self, target: &FeatureRef) -> bool {
        let Some((lon, lat)) = self.feature(target).and_then(Feature::anchor) else {
            return false;
        };
        self.set_location(MapLocation::new(MAX_ZOOM, lat, lon));
        self.selected = Some(target.clone());
        true
    }
}
