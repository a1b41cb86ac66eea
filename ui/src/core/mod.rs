//! Platform-agnostic plumbing shared by every view: configuration, errors,
//! display formatting, the persisted map location and platform glue.

pub mod config;
pub mod error;
pub mod format;
pub mod location;
pub mod platform;
