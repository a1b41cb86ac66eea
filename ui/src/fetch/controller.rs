//! Fetch controller: the state machine behind the "Show data" button.
//!
//! ```text
//! Idle ──begin──▶ Loading ──ok──▶ Loaded
//!   ▲                │
//!   └──acknowledge── Error ◀──err──┘
//! ```
//!
//! `begin` is also accepted from `Loaded` and `Error`. The viewport is tracked
//! eagerly on every map move but never triggers a request by itself; `begin`
//! snapshots it. Each request gets a fresh session id and completions for any
//! other session are dropped, so a slow response for an old viewport can never
//! overwrite a newer result or error.

use std::rc::Rc;

use api::{BoundingBox, FeatureCollection, FetchError, Url, Viewport};
use tracing::{debug, info, warn};

pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading { session: SessionId },
    Loaded { session: SessionId },
    Error { session: SessionId, message: String },
}

/// What the caller needs to run the request for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub session: SessionId,
    pub viewport: Viewport,
    pub url: Url,
}

/// A published result: the collection and the exact viewport it was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub session: SessionId,
    pub collection: Rc<FeatureCollection>,
    pub viewport: Viewport,
    pub download_url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Published,
    Failed,
    /// The session was superseded; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct FetchController {
    api_base: String,
    bounds: BoundingBox,
    filter: String,
    state: FetchState,
    last_session: SessionId,
    pending: Option<FetchTicket>,
    loaded: Option<LoadedData>,
}

impl FetchController {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            bounds: BoundingBox::default(),
            filter: String::new(),
            state: FetchState::Idle,
            last_session: 0,
            pending: None,
            loaded: None,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn update_viewport(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// What a request issued right now would cover.
    pub fn current_viewport(&self) -> Viewport {
        Viewport::new(self.bounds, &self.filter)
    }

    /// Starts a new session for the current viewport and filter.
    ///
    /// A session still in flight is superseded. If no URL can be built the
    /// controller moves straight to `Error`.
    pub fn begin(&mut self) -> Result<FetchTicket, FetchError> {
        self.last_session += 1;
        let session = self.last_session;
        if let Some(previous) = self.pending.take() {
            debug!(superseded = previous.session, session, "superseding in-flight request");
        }

        let viewport = self.current_viewport();
        match viewport.data_url(&self.api_base) {
            Ok(url) => {
                info!(session, %url, "fetching features");
                let ticket = FetchTicket {
                    session,
                    viewport,
                    url,
                };
                self.pending = Some(ticket.clone());
                self.state = FetchState::Loading { session };
                Ok(ticket)
            }
            Err(err) => {
                warn!(session, %err, "cannot build data request");
                self.state = FetchState::Error {
                    session,
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Applies the outcome of `session`. Failures leave previously loaded data in place.
    pub fn complete(
        &mut self,
        session: SessionId,
        outcome: Result<FeatureCollection, FetchError>,
    ) -> Completion {
        if self.pending.as_ref().map(|ticket| ticket.session) != Some(session) {
            debug!(session, "ignoring stale completion");
            return Completion::Stale;
        }
        let Some(ticket) = self.pending.take() else {
            return Completion::Stale;
        };

        match outcome {
            Ok(collection) => {
                info!(session, features = collection.len(), "features loaded");
                self.loaded = Some(LoadedData {
                    session,
                    collection: Rc::new(collection),
                    viewport: ticket.viewport,
                    download_url: ticket.url,
                });
                self.state = FetchState::Loaded { session };
                Completion::Published
            }
            Err(err) => {
                warn!(session, %err, "fetch failed");
                self.state = FetchState::Error {
                    session,
                    message: err.to_string(),
                };
                Completion::Failed
            }
        }
    }

    /// `Error -> Idle`. No-op in any other state.
    pub fn acknowledge_error(&mut self) {
        if matches!(self.state, FetchState::Error { .. }) {
            self.state = FetchState::Idle;
        }
    }

    pub fn loaded(&self) -> Option<&LoadedData> {
        self.loaded.as_ref()
    }

    pub fn download_url(&self) -> Option<&Url> {
        self.loaded.as_ref().map(|data| &data.download_url)
    }
}
