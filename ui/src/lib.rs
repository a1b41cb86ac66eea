//! Shared UI crate for Is OSM up-to-date: staleness scoring, the fetch
//! controller and the Dioxus explorer used by both the web and desktop shells.

pub mod bar;
pub mod core;
pub mod explorer;
pub mod fetch;
pub mod i18n;
pub mod staleness;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::{register_nav, AppNavbar, NavBuilder};
}

/// Unified theme, embedded so every shell can inline it without an asset pipeline.
pub const THEME_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/theme/main.css"));
