use dioxus::prelude::*;

use crate::explorer::ExplorerView;

#[component]
pub fn Explorer() -> Element {
    rsx! {
        ExplorerView {}
    }
}
