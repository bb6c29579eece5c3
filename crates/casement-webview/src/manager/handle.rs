use wry::WebView;

use casement_common::{Result, WebViewId};

use super::wry_err;

/// Handle to a managed WebView instance. Provides methods to interact
/// with the underlying WebView (navigate, evaluate JS, resize, etc.).
pub struct WebViewHandle {
    /// The underlying wry WebView.
    pub(super) webview: WebView,
    /// The id notifications for this WebView carry.
    pub(super) id: WebViewId,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
    /// Current title.
    pub(super) current_title: String,
}

impl WebViewHandle {
    /// The id notifications for this WebView carry.
    pub fn id(&self) -> WebViewId {
        self.id
    }

    /// Get the current URL.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Get the current title.
    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Navigate to a URL.
    pub fn load_url(&mut self, url: &str) -> Result<()> {
        self.current_url = url.to_string();
        self.webview.load_url(url).map_err(wry_err)
    }

    /// Load raw HTML content.
    pub fn load_html(&mut self, html: &str) -> Result<()> {
        self.current_url = "about:blank".to_string();
        self.webview.load_html(html).map_err(wry_err)
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<()> {
        self.webview.evaluate_script(js).map_err(wry_err)
    }

    /// Deliver a JSON payload to a page-side callback function.
    pub fn call_js_function(&self, function: &str, payload: &serde_json::Value) -> Result<()> {
        let script = crate::protocol::js_callback_invocation(function, payload);
        self.webview.evaluate_script(&script).map_err(wry_err)
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<()> {
        self.webview.set_bounds(bounds).map_err(wry_err)
    }

    /// Show or hide the WebView.
    pub fn set_visible(&self, visible: bool) -> Result<()> {
        self.webview.set_visible(visible).map_err(wry_err)
    }

    /// Focus the WebView.
    pub fn focus(&self) -> Result<()> {
        self.webview.focus().map_err(wry_err)
    }

    /// Return focus to the parent window.
    pub fn focus_parent(&self) -> Result<()> {
        self.webview.focus_parent().map_err(wry_err)
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }

    /// Set zoom level.
    pub fn zoom(&self, scale: f64) -> Result<()> {
        self.webview.zoom(scale).map_err(wry_err)
    }

    /// Update the tracked title.
    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    /// Get a reference to the underlying wry WebView.
    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}
