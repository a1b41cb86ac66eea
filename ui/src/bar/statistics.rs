use dioxus::prelude::*;

use crate::explorer::{ExplorerEvent, ExplorerState};
use crate::staleness::Extreme;
use crate::{i18n, t};

/// Worst and best feature of the loaded collection. Clicking one flies there.
#[component]
pub fn Statistics() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let (worst, best) = {
        let snapshot = state.read();
        (snapshot.worst().cloned(), snapshot.best().cloned())
    };

    let row = move |label: String, extreme: Option<Extreme>| {
        rsx! {
            li { class: "bar-statistics__row",
                span { class: "bar-statistics__label", "{label}" }
                {match extreme {
                    Some(extreme) => rsx! {
                        button {
                            class: "button button--ghost bar-statistics__link",
                            onclick: {
                                let target = extreme.feature.clone();
                                move |_| events.send(ExplorerEvent::FlyTo(target.clone()))
                            },
                            "{extreme.feature}"
                        }
                        span { class: "bar-statistics__value", "{extreme.display}" }
                    },
                    None => rsx! {
                        span { class: "bar-statistics__value bar-statistics__value--empty",
                            {t!("statistics-none")}
                        }
                    },
                }}
            }
        }
    };

    rsx! {
        section { class: "bar__section bar-statistics",
            h3 { class: "bar__title", {t!("statistics-title")} }
            ul { class: "bar-statistics__list",
                {row(t!("statistics-worst"), worst)}
                {row(t!("statistics-best"), best)}
            }
        }
    }
}
