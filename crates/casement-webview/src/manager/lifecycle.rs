use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use casement_common::{Result, WebViewId};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::{wry_err, WebViewManager};

impl WebViewManager {
    /// Create a new WebView as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The WebView is positioned at `bounds` within the parent window, and
    /// its navigation lifecycle reports into this manager's forwarder
    /// under `id`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        id: WebViewId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_incognito(config.incognito)
            .with_focused(false);

        // Bridge bootstrap script, if the app ships one
        if let Some(script) = &config.init_script {
            builder = builder.with_initialization_script(script);
        }

        // User agent
        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // Lifecycle hooks relay into the shared forwarder
        builder = Self::attach_page_load_handler(builder, Arc::clone(&self.forwarder), id);
        builder = Self::attach_navigation_handler(builder, Arc::clone(&self.forwarder), id);
        builder = Self::attach_title_handler(builder, Arc::clone(&self.forwarder), id);

        // Set initial content
        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        // Build as child WebView
        let webview = builder.build_as_child(window).map_err(wry_err)?;

        debug!(view = %id, url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            id,
            current_url: initial_url,
            current_title: String::new(),
        })
    }
}
