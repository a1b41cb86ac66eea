use dioxus::prelude::*;

use crate::explorer::{ExplorerEvent, ExplorerState};
use crate::{i18n, t};

/// Free-text filter sent along with the next request, e.g. `amenity=restaurant`.
#[component]
pub fn Settings() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let filter = state.read().filter().to_string();

    rsx! {
        section { class: "bar__section bar-settings",
            h3 { class: "bar__title", {t!("settings-title")} }
            label { class: "bar-settings__label", r#for: "filter",
                {t!("settings-filter-label")}
            }
            input {
                id: "filter",
                class: "bar-settings__input",
                r#type: "text",
                placeholder: t!("settings-filter-placeholder"),
                value: "{filter}",
                oninput: move |evt: FormEvent| events.send(ExplorerEvent::SetFilter(evt.value())),
            }
        }
    }
}
