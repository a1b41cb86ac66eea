use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::explorer::{ExplorerEvent, ExplorerState};
use crate::staleness::palette::viridis_gradient_css;
use crate::{i18n, t};

/// Worst value, colour bar, best value; plus the background saturation slider.
#[component]
pub fn Legend() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let (legend, saturation) = {
        let snapshot = state.read();
        (
            snapshot.legend(OffsetDateTime::now_utc()),
            snapshot.background_saturation(),
        )
    };
    let gradient = viridis_gradient_css();

    rsx! {
        div { class: "legend",
            div { class: "legend__bar",
                span { class: "legend__end", "{legend.worst}" }
                span { class: "legend__colors", style: "background: {gradient};" }
                span { class: "legend__end", "{legend.best}" }
            }
            label { class: "legend__slider",
                {t!("legend-background")}
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: "{saturation}",
                    oninput: move |evt: FormEvent| {
                        if let Ok(value) = evt.value().parse::<u8>() {
                            events.send(ExplorerEvent::SetBackground(value));
                        }
                    },
                }
            }
        }
    }
}
