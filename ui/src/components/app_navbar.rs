use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::{i18n, t};

/// Platform-supplied link builders.
///
/// `ui` cannot name the platform `Route` enums, so each shell registers closures
/// that wrap a localized label in a `Link` to the right route:
///
/// ```ignore
/// register_nav(NavBuilder {
///     map: |label| rsx!(Link { class: "navbar__link", to: Route::Explorer {}, "{label}" }),
///     about: |label| rsx!(Link { class: "navbar__link", to: Route::About {}, "{label}" }),
/// });
/// ```
pub struct NavBuilder {
    pub map: fn(label: &str) -> Element,
    pub about: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let current = i18n::use_language();

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                if let Some(mut code) = lang_code {
                    code.set(tag);
                }
            }
            Err(err) => tracing::warn!(%err, tag, "language switch failed"),
        }
    };

    let internal_nav = NAV_BUILDER.get().map(|builder| {
        let map = (builder.map)(&t!("nav-map"));
        let about = (builder.about)(&t!("nav-about"));
        rsx! {
            nav { class: "navbar__links",
                {map}
                {about}
            }
        }
    });

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", {t!("brand")} }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                {match internal_nav {
                    Some(nav) => nav,
                    None => rsx! { nav { class: "navbar__links", {children} } },
                }}

                if show_switcher {
                    div { class: "navbar__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
