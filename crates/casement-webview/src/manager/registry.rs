use std::collections::HashMap;

use tracing::debug;
use wry::raw_window_handle;

use casement_common::{Result, WebViewId};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Id-keyed ownership of WebView handles. A higher-level convenience over
/// `WebViewManager` for managing the full lifecycle.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<WebViewId, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    /// The manager (and through it the forwarder) this registry wraps.
    pub fn manager(&self) -> &WebViewManager {
        &self.manager
    }

    /// Create a WebView under `id` and register it.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        id: WebViewId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<()> {
        let handle = self.manager.create(id, window, bounds, config)?;
        self.handles.insert(id, handle);
        Ok(())
    }

    /// Get a handle by id.
    pub fn get(&self, id: WebViewId) -> Option<&WebViewHandle> {
        self.handles.get(&id)
    }

    /// Get a mutable handle by id.
    pub fn get_mut(&mut self, id: WebViewId) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&id)
    }

    /// Destroy a WebView by id. The observer receives a closed
    /// notification; returns false if the id was unknown.
    pub fn destroy(&mut self, id: WebViewId) -> bool {
        if self.handles.remove(&id).is_some() {
            debug!(view = %id, "WebView destroyed");
            self.manager.forwarder().closed(id);
            true
        } else {
            false
        }
    }

    /// Destroy all active WebViews. Used during graceful shutdown.
    pub fn destroy_all(&mut self) {
        let ids = self.active_views();
        for id in ids {
            self.destroy(id);
        }
    }

    /// Ids of all active WebViews.
    pub fn active_views(&self) -> Vec<WebViewId> {
        self.handles.keys().copied().collect()
    }

    /// How many WebViews are active.
    pub fn count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::observer::WebViewObserver;

    #[derive(Default)]
    struct ClosedLog(Mutex<Vec<WebViewId>>);

    impl WebViewObserver for ClosedLog {
        fn page_load_complete(&self, _view: WebViewId, _url: &str) {}

        fn should_load_url(&self, _view: WebViewId, _url: &str) -> bool {
            false
        }

        fn closed(&self, view: WebViewId) {
            self.0.lock().unwrap().push(view);
        }
    }

    #[test]
    fn empty_registry_reports_nothing_active() {
        let registry = WebViewRegistry::new(WebViewManager::new());
        assert_eq!(registry.count(), 0);
        assert!(registry.active_views().is_empty());
        assert!(registry.get(WebViewId(1)).is_none());
    }

    #[test]
    fn destroying_unknown_id_is_not_reported() {
        let observer = Arc::new(ClosedLog::default());
        let manager = WebViewManager::new();
        manager.set_observer(observer.clone());

        let mut registry = WebViewRegistry::new(manager);
        assert!(!registry.destroy(WebViewId(5)));
        assert!(observer.0.lock().unwrap().is_empty());
    }
}
