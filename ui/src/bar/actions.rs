use dioxus::prelude::*;

use crate::explorer::{ExplorerEvent, ExplorerState};
use crate::{i18n, t};

/// The "show data" trigger. Disabled while a request is running; a failed request
/// shows an indicator that goes away once dismissed.
#[component]
pub fn Actions() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();

    let snapshot = state.read();
    let loading = snapshot.is_loading();
    let error = snapshot.error_message().map(str::to_string);
    drop(snapshot);

    rsx! {
        section { class: "bar__section bar-actions",
            button {
                class: "button button--primary bar-actions__show",
                disabled: loading,
                onclick: move |_| events.send(ExplorerEvent::ShowData),
                if loading {
                    span { class: "spinner", aria_hidden: "true" }
                    {t!("actions-loading")}
                } else {
                    {t!("actions-show-data")}
                }
            }
            if let Some(message) = error {
                div { class: "bar-actions__error", role: "alert",
                    span { class: "bar-actions__error-text",
                        {t!("actions-error", message = message)}
                    }
                    button {
                        class: "button button--ghost bar-actions__dismiss",
                        onclick: move |_| events.send(ExplorerEvent::DismissError),
                        {t!("actions-dismiss")}
                    }
                }
            }
        }
    }
}
