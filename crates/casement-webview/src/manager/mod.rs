//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` instances and mounts the shared
//! [`NavigationForwarder`] on each one's lifecycle hooks, so every view
//! created by a manager reports into the same observer registration.

use std::sync::Arc;

use casement_common::CasementError;

use crate::forwarder::NavigationForwarder;
use crate::observer::WebViewObserver;

mod handle;
mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

pub(crate) fn wry_err(err: wry::Error) -> CasementError {
    CasementError::WebView(err.to_string())
}

/// Creates WebViews and relays their navigation events.
pub struct WebViewManager {
    /// Shared relay; every WebView created by this manager reports into it.
    forwarder: Arc<NavigationForwarder>,
}

impl WebViewManager {
    /// Create a manager with its own forwarder and no observer registered.
    pub fn new() -> Self {
        Self {
            forwarder: Arc::new(NavigationForwarder::new()),
        }
    }

    /// Create a manager around an existing forwarder.
    pub fn with_forwarder(forwarder: Arc<NavigationForwarder>) -> Self {
        Self { forwarder }
    }

    /// Register the observer that receives navigation notifications from
    /// every WebView created by this manager. Last writer wins.
    pub fn set_observer(&self, observer: Arc<dyn WebViewObserver>) {
        self.forwarder.set_observer(observer);
    }

    /// The forwarder this manager's WebViews report into.
    pub fn forwarder(&self) -> &Arc<NavigationForwarder> {
        &self.forwarder
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_common::WebViewId;

    struct AlwaysHandle;

    impl WebViewObserver for AlwaysHandle {
        fn page_load_complete(&self, _view: WebViewId, _url: &str) {}

        fn should_load_url(&self, _view: WebViewId, _url: &str) -> bool {
            true
        }
    }

    #[test]
    fn manager_registration_reaches_forwarder() {
        let manager = WebViewManager::new();
        assert!(!manager.forwarder().has_observer());

        manager.set_observer(Arc::new(AlwaysHandle));
        assert!(manager.forwarder().has_observer());
        assert!(manager
            .forwarder()
            .should_load_url(WebViewId(1), "https://example.com"));
    }

    #[test]
    fn managers_can_share_a_forwarder() {
        let forwarder = Arc::new(NavigationForwarder::new());
        let a = WebViewManager::with_forwarder(Arc::clone(&forwarder));
        let _b = WebViewManager::with_forwarder(Arc::clone(&forwarder));

        a.set_observer(Arc::new(AlwaysHandle));
        assert!(forwarder.has_observer());
    }
}
