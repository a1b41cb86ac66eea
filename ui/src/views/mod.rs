//! Routed pages. Platform crates wire these into their `Route` enums.

mod about;
mod explorer;

pub use about::About;
pub use explorer::Explorer;
