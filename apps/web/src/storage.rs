//! Theme persistence in the browser's `localStorage`.
//!
//! Storage may be missing (private browsing, desktop webview); reads then
//! fall back to the default theme and writes are dropped.

use nonprofit_search_core::theme::ThemeStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
impl ThemeStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    tracing::warn!(key, "Could not write to localStorage");
                }
            }
            None => tracing::warn!("localStorage unavailable, theme not persisted"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ThemeStore for BrowserStore {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn save(&mut self, key: &str, value: &str) {
        tracing::debug!(key, value, "No browser storage on this target");
    }
}
