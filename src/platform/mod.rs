//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Reading the page URL (shared settings arrive in the query string)
//! - Clipboard writes for share links
//! - CSS glow variables used by the HTML control panel

use crate::settings::SceneSettings;
use crate::share::ShareOutcome;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    // Clipboard access through the async Clipboard API
    #[wasm_bindgen(inline_js = "
        export async function write_clipboard(text) {
            if (!navigator.clipboard || !navigator.clipboard.writeText) {
                return false;
            }
            try {
                await navigator.clipboard.writeText(text);
                return true;
            } catch (e) {
                return false;
            }
        }
    ")]
    extern "C" {
        pub fn write_clipboard(text: &str) -> js_sys::Promise;
    }
}

/// Page query string including the leading `?` (empty when absent)
#[cfg(target_arch = "wasm32")]
pub fn query_string() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// `(origin, pathname)` of the current page
#[cfg(target_arch = "wasm32")]
pub fn page_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let origin = location
        .as_ref()
        .and_then(|l| l.origin().ok())
        .unwrap_or_default();
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    (origin, path)
}

/// Put `text` on the clipboard
#[cfg(target_arch = "wasm32")]
pub async fn copy_to_clipboard(text: &str) -> ShareOutcome {
    let promise = web::write_clipboard(text);
    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(v) if v.as_bool() == Some(true) => ShareOutcome::Copied,
        _ => ShareOutcome::CopyFailed,
    }
}

/// CSS custom properties mirroring the glow color
pub fn glow_variables(settings: &SceneSettings) -> [(&'static str, String); 2] {
    [
        ("--glow-color", settings.color.clone()),
        ("--glow-rgb", settings.glow_rgb_string()),
    ]
}

/// Mirror the glow color into `--glow-color` / `--glow-rgb`
#[cfg(target_arch = "wasm32")]
pub fn apply_glow_variables(settings: &SceneSettings) {
    use wasm_bindgen::JsCast;

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());

    let Some(root) = root else {
        log::warn!("No document root, glow variables not applied");
        return;
    };
    let style = root.style();
    for (name, value) in glow_variables(settings) {
        if let Err(e) = style.set_property(name, &value) {
            log::warn!("Failed to set {name}: {e:?}");
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn query_string() -> String {
    String::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_location() -> (String, String) {
    ("http://localhost".to_string(), "/".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn copy_to_clipboard(_text: &str) -> ShareOutcome {
    // No clipboard outside the browser
    ShareOutcome::CopyFailed
}

#[cfg(not(target_arch = "wasm32"))]
pub fn apply_glow_variables(settings: &SceneSettings) {
    for (name, value) in glow_variables(settings) {
        log::debug!("{name}: {value}");
    }
}

/// Settings for this page load: defaults overlaid with any shared link
pub fn initial_settings() -> SceneSettings {
    crate::share::settings_from_query(&query_string(), &SceneSettings::default())
}

/// Share link for the current page
pub fn current_share_url(settings: &SceneSettings) -> String {
    let (origin, path) = page_location();
    crate::share::share_url(&origin, &path, settings)
}
