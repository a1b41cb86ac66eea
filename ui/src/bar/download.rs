use dioxus::prelude::*;

use crate::explorer::ExplorerState;
use crate::{i18n, t};

/// Link to the exact request behind the collection on screen.
#[component]
pub fn Download() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let url = state.read().download_url().map(|url| url.to_string());

    rsx! {
        section { class: "bar__section bar-download",
            h3 { class: "bar__title", {t!("download-title")} }
            {match url {
                Some(url) => rsx! {
                    a {
                        class: "button button--accent",
                        href: "{url}",
                        download: "uptodate.geojson",
                        target: "_blank",
                        {t!("download-geojson")}
                    }
                },
                None => rsx! {
                    p { class: "bar__hint", {t!("download-empty")} }
                },
            }}
        }
    }
}
