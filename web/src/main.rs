use dioxus::prelude::*;

use ui::components::{register_nav, AppNavbar, NavBuilder};
use ui::views::{About, Explorer};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Explorer {},
    #[route("/about")]
    About {},
}

const THEME_CSS: &str = ui::THEME_CSS;

fn nav_map(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Explorer {},
        "{label}"
    })
}

fn nav_about(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::About {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    // Shared with AppNavbar, which updates it on language selection.
    let lang_code = use_signal(|| ui::i18n::FALLBACK_LANGUAGE.to_string());
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        map: nav_map,
        about: nav_about,
    });

    rsx! {
        document::Title { "Is OSM up-to-date" }
        document::Style { "{THEME_CSS}" }
        Router::<Route> {}
    }
}

#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
