use std::cell::RefCell;
use std::rc::Rc;

use api::{DataClient, FeatureCollection, FeatureRef, FetchError, Place};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::bar::{Legend, Sidebar};
use crate::core::config::AppConfig;
use crate::core::location::MapLocation;
use crate::core::platform;
use crate::fetch::{run_ticket, FetchTicket, SessionId};
use crate::staleness::Mode;

use super::map::MapCanvas;
use super::search::{SearchId, SearchTicket};
use super::state::ExplorerState;

/// Everything the widgets can ask of the explorer. All of it goes through one
/// coroutine so state changes are applied in order.
#[derive(Debug)]
pub enum ExplorerEvent {
    ShowData,
    FetchFinished {
        session: SessionId,
        outcome: Result<FeatureCollection, FetchError>,
    },
    DismissError,
    Navigate(MapLocation),
    Pan { dx: f64, dy: f64 },
    Zoom(i8),
    SetMode(Mode),
    SetPercentile(u32),
    SetFilter(String),
    SetBackground(u8),
    Select(Option<FeatureRef>),
    FlyTo(FeatureRef),
    Search(String),
    SearchFinished {
        search: SearchId,
        outcome: Result<Vec<Place>, FetchError>,
    },
    ClearSearch,
}

type SenderSlot = Rc<RefCell<Option<UnboundedSender<ExplorerEvent>>>>;

#[component]
pub fn ExplorerView() -> Element {
    let config = use_hook(AppConfig::from_env);
    let state = use_signal(move || {
        ExplorerState::restore(config, platform::read_location_hash().as_deref())
    });
    use_context_provider(|| state);

    let client = use_hook(DataClient::new);
    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<ExplorerEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let client = client.clone();
        let mut state_signal = state;

        async move {
            while let Some(event) = rx.next().await {
                apply_event(&mut state_signal, event, &sender_slot, &client);
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    rsx! {
        section { class: "page explorer",
            Sidebar {}
            div { class: "explorer__map",
                MapCanvas {}
                Legend {}
            }
        }
    }
}

fn apply_event(
    state: &mut Signal<ExplorerState>,
    event: ExplorerEvent,
    sender_slot: &SenderSlot,
    client: &DataClient,
) {
    match event {
        ExplorerEvent::ShowData => match state.with_mut(|s| s.begin_fetch()) {
            Ok(ticket) => queue_fetch(sender_slot.clone(), client.clone(), ticket),
            Err(err) => debug!(%err, "fetch not started"),
        },
        ExplorerEvent::FetchFinished { session, outcome } => {
            let completion = state.with_mut(|s| s.finish_fetch(session, outcome));
            debug!(session, ?completion, "fetch finished");
        }
        ExplorerEvent::DismissError => state.with_mut(|s| s.dismiss_error()),
        ExplorerEvent::Navigate(location) => {
            state.with_mut(|s| s.set_location(location));
            persist_location(state);
        }
        ExplorerEvent::Pan { dx, dy } => {
            state.with_mut(|s| s.pan_by(dx, dy));
            persist_location(state);
        }
        ExplorerEvent::Zoom(delta) => {
            state.with_mut(|s| s.zoom_by(delta));
            persist_location(state);
        }
        ExplorerEvent::SetMode(mode) => state.with_mut(|s| s.set_mode(mode)),
        ExplorerEvent::SetPercentile(percentile) => {
            if let Err(err) = state.with_mut(|s| s.set_percentile(percentile)) {
                warn!(%err, "percentile rejected");
            }
        }
        ExplorerEvent::SetFilter(filter) => state.with_mut(|s| s.set_filter(filter)),
        ExplorerEvent::SetBackground(value) => {
            state.with_mut(|s| s.set_background_saturation(value))
        }
        ExplorerEvent::Select(id) => state.with_mut(|s| s.select(id)),
        ExplorerEvent::FlyTo(id) => {
            if state.with_mut(|s| s.fly_to(&id)) {
                persist_location(state);
            } else {
                warn!(%id, "cannot fly to feature without position");
            }
        }
        ExplorerEvent::Search(query) => match state.with_mut(|s| s.begin_search(&query)) {
            Ok(Some(ticket)) => queue_search(sender_slot.clone(), client.clone(), ticket),
            Ok(None) => {}
            Err(err) => warn!(%err, "place search not started"),
        },
        ExplorerEvent::SearchFinished { search, outcome } => {
            if !state.with_mut(|s| s.finish_search(search, outcome)) {
                debug!(search, "stale place search ignored");
            }
        }
        ExplorerEvent::ClearSearch => state.with_mut(|s| s.clear_search()),
    }
}

fn persist_location(state: &Signal<ExplorerState>) {
    let hash = state.with(|s| s.location().to_hash());
    platform::write_location_hash(&hash);
}

fn queue_fetch(sender_slot: SenderSlot, client: DataClient, ticket: FetchTicket) {
    platform::spawn_future(async move {
        let (session, outcome) = run_ticket(&client, ticket).await;
        let sender = sender_slot.borrow().clone();
        if let Some(sender) = sender {
            let _ = sender.unbounded_send(ExplorerEvent::FetchFinished { session, outcome });
        }
    });
}

fn queue_search(sender_slot: SenderSlot, client: DataClient, ticket: SearchTicket) {
    platform::spawn_future(async move {
        let outcome = client.search_places(ticket.url).await;
        let sender = sender_slot.borrow().clone();
        if let Some(sender) = sender {
            let _ = sender.unbounded_send(ExplorerEvent::SearchFinished {
                search: ticket.search,
                outcome,
            });
        }
    });
}
