use dioxus::prelude::*;

use crate::explorer::{ExplorerEvent, ExplorerState};
use crate::staleness::cluster::{MAX_PERCENTILE, MIN_PERCENTILE};
use crate::staleness::Mode;
use crate::{i18n, t};

fn mode_label(mode: Mode) -> String {
    match mode {
        Mode::LastEdit => t!("mode-lastedit"),
        Mode::Creation => t!("mode-creation"),
        Mode::Revisions => t!("mode-revisions"),
        Mode::Frequency => t!("mode-frequency"),
    }
}

/// Mode radios and the cluster percentile slider.
#[component]
pub fn Criteria() -> Element {
    i18n::use_language();
    let state = use_context::<Signal<ExplorerState>>();
    let events = use_coroutine_handle::<ExplorerEvent>();
    let (active, percentile) = {
        let snapshot = state.read();
        (snapshot.mode(), snapshot.percentile())
    };

    rsx! {
        section { class: "bar__section bar-criteria",
            h3 { class: "bar__title", {t!("criteria-title")} }
            fieldset { class: "bar-criteria__modes",
                legend { class: "visually-hidden", {t!("criteria-mode-legend")} }
                for mode in Mode::ALL {
                    label { key: "{mode}", class: "bar-criteria__mode",
                        input {
                            r#type: "radio",
                            name: "mode",
                            id: "{mode}",
                            value: "{mode}",
                            checked: mode == active,
                            onchange: move |evt: FormEvent| {
                                match Mode::from_name(&evt.value()) {
                                    Ok(mode) => events.send(ExplorerEvent::SetMode(mode)),
                                    Err(err) => tracing::warn!(%err, "mode radio"),
                                }
                            },
                        }
                        {mode_label(mode)}
                    }
                }
            }
            label { class: "bar-criteria__percentile", r#for: "percentile",
                {t!("criteria-percentile", value = percentile)}
            }
            input {
                id: "percentile",
                r#type: "range",
                min: "{MIN_PERCENTILE}",
                max: "{MAX_PERCENTILE}",
                value: "{percentile}",
                oninput: move |evt: FormEvent| {
                    if let Ok(value) = evt.value().parse::<u32>() {
                        events.send(ExplorerEvent::SetPercentile(value));
                    }
                },
            }
            p { class: "bar__hint", {t!("criteria-percentile-hint")} }
        }
    }
}
