//! SVG map canvas: OSM raster tiles, the loaded request boundary, scored markers
//! and clusters, plus the popup of the selected feature.

use api::FeatureRef;
use dioxus::prelude::*;
use tracing::warn;

use crate::core::location::{MapLocation, MAX_ZOOM};
use crate::{i18n, t};

use super::clustering::MapGlyph;
use super::search_box::SearchBox;
use super::state::ExplorerState;
use super::view::ExplorerEvent;

const TILE_URL: &str = "https://tile.openstreetmap.org";
const MARKER_RADIUS: f64 = 5.0;
const MARKER_STROKE: &str = "#555";
const BOUNDARY_STROKE: &str = "#ff7800";
/// Mouse travel below this is a click, not a drag.
const DRAG_THRESHOLD_PX: f64 = 3.0;
/// Clicking a cluster zooms in by this many levels.
const CLUSTER_ZOOM_STEP: u8 = 2;

#[component]
pub fn MapCanvas() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let mut drag_origin = use_signal(|| Option::<(f64, f64)>::None);
    let mut drag_offset = use_signal(|| (0.0_f64, 0.0_f64));

    let snapshot = state.read();
    let projection = snapshot.projection();
    let (width, height) = (projection.width(), projection.height());
    let grayscale = snapshot.background_grayscale();
    let location = snapshot.location();
    let tiles = projection.tiles();
    let boundary = snapshot.loaded_bounds().map(|b| projection.rect(&b));
    let glyphs = match snapshot.glyphs() {
        Ok(glyphs) => glyphs,
        Err(err) => {
            warn!(%err, "cannot cluster markers");
            Vec::new()
        }
    };
    let selected = snapshot.selected().cloned();
    let popup = snapshot.popup();
    let popup_anchor = selected.as_ref().and_then(|id| {
        snapshot
            .feature(id)
            .and_then(|feature| feature.anchor())
            .map(|(lon, lat)| projection.project(lon, lat))
    });
    drop(snapshot);

    let (offset_x, offset_y) = drag_offset();
    let transform = format!("translate({offset_x} {offset_y})");

    let finish_drag = move |_: MouseEvent| {
        if drag_origin.take().is_some() {
            let (dx, dy) = drag_offset();
            drag_offset.set((0.0, 0.0));
            if dx.abs().max(dy.abs()) > DRAG_THRESHOLD_PX {
                events.send(ExplorerEvent::Pan { dx, dy });
            }
        }
    };

    rsx! {
        div { class: "map",
            style: "width: {width}px; height: {height}px;",
            svg {
                class: "map__canvas",
                width: "{width}",
                height: "{height}",
                view_box: "0 0 {width} {height}",
                onwheel: move |evt: WheelEvent| {
                    evt.prevent_default();
                    let delta = evt.delta().strip_units();
                    if delta.y < 0.0 {
                        events.send(ExplorerEvent::Zoom(1));
                    } else if delta.y > 0.0 {
                        events.send(ExplorerEvent::Zoom(-1));
                    }
                },
                onmousedown: move |evt: MouseEvent| {
                    let point = evt.client_coordinates();
                    drag_origin.set(Some((point.x, point.y)));
                },
                onmousemove: move |evt: MouseEvent| {
                    if let Some((x0, y0)) = drag_origin() {
                        let point = evt.client_coordinates();
                        drag_offset.set((point.x - x0, point.y - y0));
                    }
                },
                onmouseup: finish_drag,
                onmouseleave: finish_drag,

                g { transform: "{transform}",
                    g {
                        class: "map__tiles",
                        style: "filter: grayscale({grayscale}%);",
                        onclick: move |_| events.send(ExplorerEvent::Select(None)),
                        for tile in tiles {
                            image {
                                key: "{tile.z}-{tile.x}-{tile.y}-{tile.left}",
                                href: "{TILE_URL}/{tile.z}/{tile.x}/{tile.y}.png",
                                x: "{tile.left}",
                                y: "{tile.top}",
                                width: "256",
                                height: "256",
                            }
                        }
                    }

                    if let Some((x, y, w, h)) = boundary {
                        rect {
                            class: "map__boundary",
                            x: "{x}",
                            y: "{y}",
                            width: "{w}",
                            height: "{h}",
                            fill: "none",
                            stroke: BOUNDARY_STROKE,
                            stroke_width: "2",
                        }
                    }

                    {glyphs.into_iter().map(|glyph| glyph_node(glyph, selected.as_ref(), location, events))}
                }
            }

            if let (Some(info), Some((x, y))) = (popup, popup_anchor) {
                div {
                    class: "map__popup",
                    style: "left: {x}px; top: {y}px;",
                    button {
                        class: "map__popup-close",
                        aria_label: t!("popup-close"),
                        onclick: move |_| events.send(ExplorerEvent::Select(None)),
                        "×"
                    }
                    strong { "{info.title}" }
                    dl {
                        dt { {t!("popup-last-edit")} }
                        dd { "{info.last_edit}" }
                        dt { {t!("popup-created")} }
                        dd { "{info.created}" }
                        dt { {t!("popup-version")} }
                        dd { "{info.version}" }
                    }
                    div { class: "map__popup-links",
                        a { href: "{info.links.edit}", target: "_blank", rel: "noopener", {t!("popup-edit")} }
                        " | "
                        a { href: "{info.links.history}", target: "_blank", rel: "noopener", {t!("popup-history")} }
                        " | "
                        a { href: "{info.links.details}", target: "_blank", rel: "noopener", {t!("popup-details")} }
                    }
                }
            }

            div { class: "map__controls",
                button {
                    class: "button button--ghost",
                    title: t!("map-zoom-in"),
                    disabled: location.zoom >= MAX_ZOOM,
                    onclick: move |_| events.send(ExplorerEvent::Zoom(1)),
                    "+"
                }
                button {
                    class: "button button--ghost",
                    title: t!("map-zoom-out"),
                    onclick: move |_| events.send(ExplorerEvent::Zoom(-1)),
                    "−"
                }
                div { class: "map__pan",
                    button { class: "button button--ghost", title: t!("map-pan-up"),
                        onclick: move |_| events.send(ExplorerEvent::Pan { dx: 0.0, dy: height / 3.0 }), "↑" }
                    button { class: "button button--ghost", title: t!("map-pan-left"),
                        onclick: move |_| events.send(ExplorerEvent::Pan { dx: width / 3.0, dy: 0.0 }), "←" }
                    button { class: "button button--ghost", title: t!("map-pan-right"),
                        onclick: move |_| events.send(ExplorerEvent::Pan { dx: -width / 3.0, dy: 0.0 }), "→" }
                    button { class: "button button--ghost", title: t!("map-pan-down"),
                        onclick: move |_| events.send(ExplorerEvent::Pan { dx: 0.0, dy: -height / 3.0 }), "↓" }
                }
            }

            SearchBox {}

            div { class: "map__attribution",
                "© "
                a { href: "https://www.openstreetmap.org/copyright", target: "_blank", "OpenStreetMap" }
                " contributors"
            }
        }
    }
}

fn glyph_node(
    glyph: MapGlyph,
    selected: Option<&FeatureRef>,
    location: MapLocation,
    events: Coroutine<ExplorerEvent>,
) -> Element {
    match glyph {
        MapGlyph::Single(marker) => {
            let target = marker.feature.clone();
            let active = selected == Some(&marker.feature);
            rsx! {
                circle {
                    key: "m-{marker.feature}",
                    class: if active { "map__marker map__marker--active" } else { "map__marker" },
                    cx: "{marker.x}",
                    cy: "{marker.y}",
                    r: "{MARKER_RADIUS}",
                    fill: "{marker.color}",
                    stroke: MARKER_STROKE,
                    stroke_width: "1",
                    "data-score": "{marker.score:.3}",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        events.send(ExplorerEvent::Select(Some(target.clone())));
                    },
                }
            }
        }
        MapGlyph::Cluster(cluster) => {
            let radius = 12.0 + (cluster.count as f64).log10() * 6.0;
            let target = MapLocation::new(
                location.zoom.saturating_add(CLUSTER_ZOOM_STEP),
                cluster.lat,
                cluster.lon,
            );
            rsx! {
                g {
                    key: "c-{cluster.x}-{cluster.y}",
                    class: "map__cluster",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        events.send(ExplorerEvent::Navigate(target));
                    },
                    circle {
                        cx: "{cluster.x}",
                        cy: "{cluster.y}",
                        r: "{radius}",
                        fill: "{cluster.color}",
                        "data-score": "{cluster.score:.3}",
                    }
                    text {
                        class: "map__cluster-count",
                        x: "{cluster.x}",
                        y: "{cluster.y}",
                        text_anchor: "middle",
                        dominant_baseline: "central",
                        "{cluster.count}"
                    }
                }
            }
        }
    }
}
