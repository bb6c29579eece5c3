/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load (mutually exclusive with `html`).
    pub url: Option<String>,
    /// Initial HTML content to render (mutually exclusive with `url`).
    pub html: Option<String>,
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
    /// Run without persistent storage (cookies, cache).
    pub incognito: bool,
    /// Script injected into every page before it runs (bridge bootstrap).
    pub init_script: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some("Casement/0.1".to_string()),
            clipboard: true,
            incognito: false,
            init_script: None,
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a config that renders inline HTML.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Set the bridge bootstrap script.
    pub fn init_script(mut self, script: impl Into<String>) -> Self {
        self.init_script = Some(script.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_url_sets_only_url() {
        let config = WebViewConfig::with_url("https://example.com");
        assert_eq!(config.url.as_deref(), Some("https://example.com"));
        assert!(config.html.is_none());
    }

    #[test]
    fn with_html_sets_only_html() {
        let config = WebViewConfig::with_html("<h1>hi</h1>");
        assert_eq!(config.html.as_deref(), Some("<h1>hi</h1>"));
        assert!(config.url.is_none());
    }

    #[test]
    fn init_script_chains() {
        let config = WebViewConfig::with_url("https://example.com")
            .init_script("window.bridge = {};");
        assert_eq!(config.init_script.as_deref(), Some("window.bridge = {};"));
    }
}
