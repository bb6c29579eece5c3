//! Pass-through relay between platform lifecycle hooks and the observer.
//!
//! `NavigationForwarder` sits where the platform WebView's extension point
//! would be: the binding layer feeds it raw notifications, and it forwards
//! each one verbatim to whichever [`WebViewObserver`] is registered.

use std::sync::{Arc, Mutex};

use tracing::debug;

use casement_common::WebViewId;

use crate::observer::WebViewObserver;

/// Relays navigation notifications to the registered observer.
///
/// Registration is optional and overwritable; the forwarder holds a
/// reference to the observer but does not own its lifetime. With no
/// observer registered, load and title notifications are dropped and
/// navigation decisions fall back to "allow default loading"; never an
/// unguarded dereference.
pub struct NavigationForwarder {
    observer: Mutex<Option<Arc<dyn WebViewObserver>>>,
}

impl NavigationForwarder {
    pub fn new() -> Self {
        Self {
            observer: Mutex::new(None),
        }
    }

    /// Register an observer, replacing any current registration.
    /// Last writer wins.
    pub fn set_observer(&self, observer: Arc<dyn WebViewObserver>) {
        if let Ok(mut slot) = self.observer.lock() {
            *slot = Some(observer);
        }
    }

    /// Remove the current registration. Subsequent notifications are
    /// dropped until a new observer is set.
    pub fn clear_observer(&self) {
        if let Ok(mut slot) = self.observer.lock() {
            *slot = None;
        }
    }

    /// Whether an observer is currently registered.
    pub fn has_observer(&self) -> bool {
        self.observer
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    // The lock covers only the registration lookup; the observer is invoked
    // after it is released, so an observer may re-register from inside its
    // own notification without deadlocking.
    fn current(&self) -> Option<Arc<dyn WebViewObserver>> {
        self.observer.lock().ok().and_then(|slot| slot.clone())
    }

    /// Forward a page-load-started notification.
    pub fn page_load_started(&self, view: WebViewId, url: &str) {
        match self.current() {
            Some(observer) => observer.page_load_started(view, url),
            None => debug!(view = %view, url = %url, "page load started: no observer"),
        }
    }

    /// Forward a page-load-complete notification, passing view and URL
    /// through unchanged. No-op when no observer is registered.
    pub fn page_load_complete(&self, view: WebViewId, url: &str) {
        match self.current() {
            Some(observer) => observer.page_load_complete(view, url),
            None => debug!(view = %view, url = %url, "page load complete: no observer"),
        }
    }

    /// Forward a navigation decision and return the observer's verdict
    /// unchanged. Without an observer the verdict is `false`: the default
    /// engine handles the navigation.
    pub fn should_load_url(&self, view: WebViewId, url: &str) -> bool {
        match self.current() {
            Some(observer) => observer.should_load_url(view, url),
            None => {
                debug!(view = %view, url = %url, "navigation decision: no observer, defaulting");
                false
            }
        }
    }

    /// Forward a title-change notification.
    pub fn title_changed(&self, view: WebViewId, title: &str) {
        match self.current() {
            Some(observer) => observer.title_changed(view, title),
            None => debug!(view = %view, title = %title, "title change: no observer"),
        }
    }

    /// Forward a view-closed notification.
    pub fn closed(&self, view: WebViewId) {
        match self.current() {
            Some(observer) => observer.closed(view),
            None => debug!(view = %view, "closed: no observer"),
        }
    }
}

impl Default for NavigationForwarder {
    fn default() -> Self {
        Self::new()
    }
}
