//! Viewport-driven data fetching.

pub mod controller;
pub mod source;

pub use controller::{Completion, FetchController, FetchState, FetchTicket, LoadedData, SessionId};
pub use source::{run_ticket, FeatureSource};
