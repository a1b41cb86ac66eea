use dioxus::prelude::*;

use crate::staleness::palette::viridis_gradient_css;
use crate::{i18n, t};

const WIKI_URL: &str = "https://wiki.openstreetmap.org/wiki/Is_OSM_up-to-date";
const SOURCE_URL: &str = "https://github.com/frafra/is-osm-uptodate";

#[component]
pub fn About() -> Element {
    i18n::use_language();
    let gradient = viridis_gradient_css();

    rsx! {
        section { class: "page page-about",
            h1 { {t!("about-title")} }
            p { {t!("about-intro")} }
            ul { class: "page-about__modes",
                li { strong { {t!("mode-lastedit")} } " · " {t!("about-mode-lastedit")} }
                li { strong { {t!("mode-creation")} } " · " {t!("about-mode-creation")} }
                li { strong { {t!("mode-revisions")} } " · " {t!("about-mode-revisions")} }
                li { strong { {t!("mode-frequency")} } " · " {t!("about-mode-frequency")} }
            }
            div { class: "page-about__scale",
                span { {t!("about-scale-worst")} }
                span { class: "legend__colors", style: "background: {gradient};" }
                span { {t!("about-scale-best")} }
            }
            p { {t!("about-clusters")} }
            p { class: "page-about__links",
                a { href: WIKI_URL, target: "_blank", rel: "noopener", {t!("about-wiki")} }
                " · "
                a { href: SOURCE_URL, target: "_blank", rel: "noopener", {t!("about-source")} }
            }
        }
    }
}
