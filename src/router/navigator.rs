//! Side-effect sink for navigation and document titles.
//!
//! The guard and gateway only decide where to go; a `Navigator` makes it
//! happen. `BrowserNavigator` drives the real history stack in the csr
//! build and logs otherwise.

pub trait Navigator {
    /// Push `path` as the next in-app location.
    fn navigate(&self, path: &str);

    fn set_title(&self, title: &str);
}

/// History-API navigator for the browser.
///
/// Pushing a state and dispatching `popstate` lets `leptos_router` pick up
/// the new location without a full page load.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let pushed = window
                .history()
                .and_then(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)));
            if pushed.is_err() {
                let _ = window.location().set_href(path);
                return;
            }
            if let Ok(event) = web_sys::Event::new("popstate") {
                let _ = window.dispatch_event(&event);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("navigate to {path} (no browser)");
        }
    }

    fn set_title(&self, title: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                doc.set_title(title);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = title;
        }
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}
