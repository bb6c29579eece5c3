//! App-scheme message protocol between page scripts and native code.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the page navigates to `scheme://command?args`. The
//!   observer recognizes the scheme inside `should_load_url`, parses the
//!   command, dispatches it, and consumes the navigation so the default
//!   engine never sees it.
//! - **Rust -> JS**: native code calls
//!   [`WebViewHandle::evaluate_script`](crate::WebViewHandle::evaluate_script)
//!   with a snippet built by [`js_callback_invocation`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use casement_common::WebViewId;

use crate::observer::WebViewObserver;

/// A command carried by an app-scheme URL.
///
/// `scheme://resize?640&480` parses to command `resize` with positional
/// args `["640", "480"]`; `scheme://open?path=%2Ftmp%2Fa` parses to command
/// `open` with kwarg `path = /tmp/a`. When the URL has no query string,
/// trailing path segments are taken as positional args
/// (`scheme://open/docs/readme`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    /// The command name. Always a plain identifier.
    pub command: String,
    /// Positional arguments, percent-decoded.
    pub args: Vec<String>,
    /// Keyword arguments, percent-decoded.
    pub kwargs: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("message URL has no command")]
    EmptyCommand,

    #[error("invalid command name: {0:?}")]
    InvalidCommand(String),

    #[error("bad percent-encoding: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

impl ProtocolMessage {
    /// Parse a candidate URL against `scheme`.
    ///
    /// Returns `Ok(None)` when the URL does not carry the scheme at all:
    /// plain navigation, not a message. Malformed message URLs (empty or
    /// non-identifier command, broken percent-encoding) are errors.
    pub fn parse(scheme: &str, url: &str) -> Result<Option<Self>, ProtocolError> {
        let rest = match url.strip_prefix(scheme).and_then(|r| r.strip_prefix("://")) {
            Some(rest) => rest,
            None => return Ok(None),
        };

        let (head, query) = match rest.split_once('?') {
            Some((head, query)) => (head, query),
            None => (rest, ""),
        };
        let (command_raw, path) = match head.split_once('/') {
            Some((command, path)) => (command, path),
            None => (head, ""),
        };

        let command = decode(command_raw)?;
        if command.is_empty() {
            return Err(ProtocolError::EmptyCommand);
        }
        if !is_valid_command(&command) {
            return Err(ProtocolError::InvalidCommand(command));
        }

        // Arguments ride in the query string; without one, any trailing
        // path segments are positional args.
        let segments: Vec<&str> = if !query.is_empty() {
            query.split('&').collect()
        } else if !path.is_empty() {
            path.split('/').collect()
        } else {
            Vec::new()
        };

        let mut args = Vec::new();
        let mut kwargs = HashMap::new();
        for segment in segments.into_iter().filter(|s| !s.is_empty()) {
            match segment.split_once('=') {
                Some((key, value)) => {
                    kwargs.insert(decode(key)?, decode(value)?);
                }
                None => args.push(decode(segment)?),
            }
        }

        Ok(Some(Self {
            command,
            args,
            kwargs,
        }))
    }
}

impl From<ProtocolError> for casement_common::CasementError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err.to_string())
    }
}

fn decode(raw: &str) -> Result<String, ProtocolError> {
    Ok(urlencoding::decode(raw)?.into_owned())
}

/// Command names become handler lookups, so they are restricted to
/// identifier characters.
fn is_valid_command(command: &str) -> bool {
    let mut chars = command.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build the JS snippet that delivers `payload` to a page-side callback.
///
/// `function` must be a trusted identifier or dotted path defined by the
/// page (it is emitted verbatim); the payload is JSON-encoded.
pub fn js_callback_invocation(function: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!("{}({});", function, payload_json)
}

/// Handler invoked for each parsed [`ProtocolMessage`].
pub type MessageHandler = dyn Fn(WebViewId, ProtocolMessage) + Send + Sync;

/// Observer that consumes app-scheme message URLs and defers everything
/// else to an optional inner observer.
///
/// Message URLs always return `true` from `should_load_url`: the page
/// navigated there to talk to us, not to go anywhere. Malformed message
/// URLs are consumed too (and logged), so a broken page script never
/// reaches the default engine with an app-scheme URL.
pub struct MessageDispatch {
    scheme: String,
    handler: Box<MessageHandler>,
    inner: Option<Arc<dyn WebViewObserver>>,
}

impl MessageDispatch {
    pub fn new(
        scheme: impl Into<String>,
        handler: impl Fn(WebViewId, ProtocolMessage) + Send + Sync + 'static,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            handler: Box::new(handler),
            inner: None,
        }
    }

    /// Chain an observer that receives every notification this dispatcher
    /// does not consume.
    pub fn with_inner(mut self, inner: Arc<dyn WebViewObserver>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// The scheme this dispatcher listens on.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl WebViewObserver for MessageDispatch {
    fn page_load_complete(&self, view: WebViewId, url: &str) {
        if let Some(inner) = &self.inner {
            inner.page_load_complete(view, url);
        }
    }

    fn should_load_url(&self, view: WebViewId, url: &str) -> bool {
        match ProtocolMessage::parse(&self.scheme, url) {
            Ok(Some(message)) => {
                debug!(view = %view, command = %message.command, "dispatching message");
                (self.handler)(view, message);
                true
            }
            Ok(None) => match &self.inner {
                Some(inner) => inner.should_load_url(view, url),
                None => false,
            },
            Err(err) => {
                warn!(view = %view, url = %url, error = %err, "malformed message URL consumed");
                true
            }
        }
    }

    fn page_load_started(&self, view: WebViewId, url: &str) {
        if let Some(inner) = &self.inner {
            inner.page_load_started(view, url);
        }
    }

    fn title_changed(&self, view: WebViewId, title: &str) {
        if let Some(inner) = &self.inner {
            inner.title_changed(view, title);
        }
    }

    fn closed(&self, view: WebViewId) {
        if let Some(inner) = &self.inner {
            inner.closed(view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // -----------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------

    #[test]
    fn non_scheme_urls_pass_through() {
        assert_eq!(
            ProtocolMessage::parse("app", "https://example.com").unwrap(),
            None
        );
        assert_eq!(ProtocolMessage::parse("app", "about:blank").unwrap(), None);
        // Prefix of another scheme does not match.
        assert_eq!(
            ProtocolMessage::parse("app", "apple://open").unwrap(),
            None
        );
    }

    #[test]
    fn bare_command() {
        let msg = ProtocolMessage::parse("app", "app://refresh")
            .unwrap()
            .unwrap();
        assert_eq!(msg.command, "refresh");
        assert!(msg.args.is_empty());
        assert!(msg.kwargs.is_empty());
    }

    #[test]
    fn positional_args_from_query() {
        let msg = ProtocolMessage::parse("app", "app://resize?640&480")
            .unwrap()
            .unwrap();
        assert_eq!(msg.command, "resize");
        assert_eq!(msg.args, vec!["640", "480"]);
        assert!(msg.kwargs.is_empty());
    }

    #[test]
    fn keyword_args_from_query() {
        let msg = ProtocolMessage::parse("app", "app://open?path=%2Ftmp%2Fnotes&mode=edit")
            .unwrap()
            .unwrap();
        assert_eq!(msg.command, "open");
        assert!(msg.args.is_empty());
        assert_eq!(msg.kwargs["path"], "/tmp/notes");
        assert_eq!(msg.kwargs["mode"], "edit");
    }

    #[test]
    fn mixed_args_and_kwargs() {
        let msg = ProtocolMessage::parse("app", "app://log?hello%20world&level=warn")
            .unwrap()
            .unwrap();
        assert_eq!(msg.args, vec!["hello world"]);
        assert_eq!(msg.kwargs["level"], "warn");
    }

    #[test]
    fn path_segments_as_positional_args() {
        let msg = ProtocolMessage::parse("app", "app://open/docs/readme")
            .unwrap()
            .unwrap();
        assert_eq!(msg.command, "open");
        assert_eq!(msg.args, vec!["docs", "readme"]);
    }

    #[test]
    fn query_wins_over_path_args() {
        let msg = ProtocolMessage::parse("app", "app://open/ignored?kept")
            .unwrap()
            .unwrap();
        assert_eq!(msg.args, vec!["kept"]);
    }

    #[test]
    fn decodes_utf8_percent_sequences() {
        let msg = ProtocolMessage::parse("app", "app://notify?title=caf%C3%A9")
            .unwrap()
            .unwrap();
        assert_eq!(msg.kwargs["title"], "café");
    }

    #[test]
    fn empty_segments_are_skipped() {
        let msg = ProtocolMessage::parse("app", "app://go?a&&b")
            .unwrap()
            .unwrap();
        assert_eq!(msg.args, vec!["a", "b"]);
    }

    #[test]
    fn empty_command_is_error() {
        let err = ProtocolMessage::parse("app", "app://").unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyCommand));

        let err = ProtocolMessage::parse("app", "app://?arg").unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyCommand));
    }

    #[test]
    fn non_identifier_command_is_error() {
        let err = ProtocolMessage::parse("app", "app://do-thing").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCommand(_)));

        let err = ProtocolMessage::parse("app", "app://1shot").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCommand(_)));
    }

    #[test]
    fn broken_percent_encoding_is_error() {
        // %FF is not valid UTF-8 on its own.
        let err = ProtocolMessage::parse("app", "app://go?%FF").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn parse_errors_convert_to_workspace_error() {
        let err = ProtocolMessage::parse("app", "app://").unwrap_err();
        let converted: casement_common::CasementError = err.into();
        assert_eq!(
            converted.to_string(),
            "message protocol error: message URL has no command"
        );
    }

    #[test]
    fn serialization_round_trip() {
        let msg = ProtocolMessage::parse("app", "app://open?path=%2Ftmp&ro")
            .unwrap()
            .unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        let back: ProtocolMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    // -----------------------------------------------------------------
    // JS callback invocation
    // -----------------------------------------------------------------

    #[test]
    fn js_invocation_encodes_payload() {
        let js = js_callback_invocation(
            "bridge.onReply",
            &serde_json::json!({"ok": true, "count": 2}),
        );
        assert_eq!(js, r#"bridge.onReply({"count":2,"ok":true});"#);
    }

    #[test]
    fn js_invocation_escapes_strings() {
        let js = js_callback_invocation("cb", &serde_json::json!("a \"quoted\" value"));
        assert_eq!(js, r#"cb("a \"quoted\" value");"#);
    }

    // -----------------------------------------------------------------
    // MessageDispatch
    // -----------------------------------------------------------------

    fn collecting_dispatch(scheme: &str) -> (MessageDispatch, Arc<Mutex<Vec<ProtocolMessage>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let dispatch = MessageDispatch::new(scheme, move |_view, message| {
            sink.lock().unwrap().push(message);
        });
        (dispatch, received)
    }

    #[test]
    fn dispatch_consumes_message_urls() {
        let (dispatch, received) = collecting_dispatch("app");

        assert!(dispatch.should_load_url(WebViewId(1), "app://open?path=%2Ftmp"));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].command, "open");
        assert_eq!(received[0].kwargs["path"], "/tmp");
    }

    #[test]
    fn dispatch_allows_plain_navigation_without_inner() {
        let (dispatch, received) = collecting_dispatch("app");

        assert!(!dispatch.should_load_url(WebViewId(1), "https://example.com"));
        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatch_defers_plain_navigation_to_inner() {
        struct Blocker;

        impl WebViewObserver for Blocker {
            fn page_load_complete(&self, _view: WebViewId, _url: &str) {}

            fn should_load_url(&self, _view: WebViewId, _url: &str) -> bool {
                true
            }
        }

        let (dispatch, _) = collecting_dispatch("app");
        let dispatch = dispatch.with_inner(Arc::new(Blocker));

        // Inner observer takes over non-message navigations.
        assert!(dispatch.should_load_url(WebViewId(1), "https://example.com"));
    }

    #[test]
    fn dispatch_consumes_malformed_message_urls() {
        let (dispatch, received) = collecting_dispatch("app");

        assert!(dispatch.should_load_url(WebViewId(1), "app://not-an-identifier"));
        assert!(received.lock().unwrap().is_empty());
    }
}
