//! The map explorer: presentation state, projection, clustering, place search and
//! the Dioxus components that render them.

pub mod clustering;
pub mod map;
pub mod popup;
pub mod projection;
pub mod search;
pub mod search_box;
pub mod state;
pub mod view;

pub use clustering::{cluster_markers, ClusterMark, GridOptions, MapGlyph, Marker};
pub use popup::{OsmLinks, PopupInfo};
pub use projection::{Projection, TilePlacement};
pub use search::{fit_bounds, place_location, PlaceSearch, SearchId, SearchTicket};
pub use search_box::SearchBox;
pub use state::ExplorerState;
pub use view::{ExplorerEvent, ExplorerView};
