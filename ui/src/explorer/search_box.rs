use dioxus::prelude::*;

use crate::{i18n, t};

use super::state::ExplorerState;
use super::view::ExplorerEvent;

/// Place search over the map. Picking a result moves the map there.
#[component]
pub fn SearchBox() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let mut text = use_signal(String::new);

    let (searching, error, nothing, results) = {
        let snapshot = state.read();
        let search = snapshot.search();
        let results: Vec<_> = search
            .results()
            .iter()
            .map(|place| (place.display_name.clone(), snapshot.place_location(place)))
            .collect();
        (
            search.is_searching(),
            search.error().map(str::to_string),
            search.found_nothing(),
            results,
        )
    };

    rsx! {
        div { class: "map__search",
            form {
                class: "map__search-form",
                role: "search",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    events.send(ExplorerEvent::Search(text()));
                },
                input {
                    class: "map__search-input",
                    r#type: "search",
                    aria_label: t!("search-label"),
                    placeholder: t!("search-placeholder"),
                    value: "{text}",
                    oninput: move |evt: FormEvent| text.set(evt.value()),
                }
                button {
                    class: "button button--ghost",
                    r#type: "submit",
                    disabled: searching,
                    title: t!("search-submit"),
                    if searching {
                        span { class: "spinner spinner--dark" }
                    } else {
                        "🔍"
                    }
                }
            }

            if let Some(message) = error {
                p { class: "map__search-error", role: "alert",
                    {t!("search-error", message = message)}
                }
            }
            if nothing {
                p { class: "map__search-empty", {t!("search-no-results")} }
            }
            if !results.is_empty() {
                ul { class: "map__search-results",
                    for (index, (name, location)) in results.into_iter().enumerate() {
                        li { key: "{index}",
                            button {
                                class: "map__search-result",
                                onclick: move |_| {
                                    text.set(String::new());
                                    events.send(ExplorerEvent::ClearSearch);
                                    events.send(ExplorerEvent::Navigate(location));
                                },
                                "{name}"
                            }
                        }
                    }
                }
            }
        }
    }
}
