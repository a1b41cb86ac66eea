//! Sidebar widgets around the map.

mod actions;
mod criteria;
mod download;
mod legend;
mod settings;
mod statistics;

use dioxus::prelude::*;

pub use actions::Actions;
pub use criteria::Criteria;
pub use download::Download;
pub use legend::Legend;
pub use settings::Settings;
pub use statistics::Statistics;

#[component]
pub fn Sidebar() -> Element {
    rsx! {
        aside { class: "bar",
            Settings {}
            Actions {}
            Criteria {}
            Statistics {}
            Download {}
        }
    }
}
