//! The callback capability hosts implement to observe WebView navigation.

use casement_common::WebViewId;

/// Contract for receiving navigation notifications from a WebView.
///
/// Exactly two operations are required. Both run synchronously within the
/// platform's event dispatch, so implementations must return promptly.
///
/// The boolean returned by [`should_load_url`](Self::should_load_url)
/// follows the handled/not-handled convention: `true` means "I handled this
/// navigation myself, do not let the default engine load it", `false` means
/// "allow default loading". Observers that want normal navigation must
/// return `false`, not `true`.
pub trait WebViewObserver: Send + Sync {
    /// A page finished loading in `view`.
    fn page_load_complete(&self, view: WebViewId, url: &str);

    /// `view` wants to navigate to `url`. Return `true` to take over the
    /// navigation, `false` to let the default engine load it.
    fn should_load_url(&self, view: WebViewId, url: &str) -> bool;

    /// Navigation to `url` started in `view`.
    fn page_load_started(&self, _view: WebViewId, _url: &str) {}

    /// The document title of `view` changed.
    fn title_changed(&self, _view: WebViewId, _title: &str) {}

    /// `view` was destroyed. No further notifications follow for this id.
    fn closed(&self, _view: WebViewId) {}
}
