//! Platform glue: spawning futures, the page origin and the location hash.
//!
//! On the web the hash lives in the address bar. Desktop builds have no address bar,
//! so the last written hash is kept in memory for the lifetime of the process.

use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}

/// `scheme://host[:port]` of the page serving the app, if there is one.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn read_location_hash() -> Option<String> {
    web_sys::window()?
        .location()
        .hash()
        .ok()
        .filter(|hash| !hash.is_empty())
}

#[cfg(target_arch = "wasm32")]
pub fn write_location_hash(hash: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_hash(hash).is_err() {
            tracing::warn!(hash, "failed to update location hash");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
static LOCATION_HASH: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

#[cfg(not(target_arch = "wasm32"))]
pub fn read_location_hash() -> Option<String> {
    LOCATION_HASH.lock().ok().and_then(|hash| hash.clone())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_location_hash(hash: &str) {
    if let Ok(mut slot) = LOCATION_HASH.lock() {
        slot.replace(hash.to_string());
    }
}
