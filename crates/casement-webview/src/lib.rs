//! WebView navigation callbacks over `wry`.
//!
//! Provides:
//! - A callback capability ([`WebViewObserver`]) that hosts implement to
//!   watch page loads and intercept navigation
//! - A forwarding adapter ([`NavigationForwarder`]) that relays the
//!   platform's lifecycle notifications to the registered observer
//! - A binding layer that mounts the forwarder on real `wry` WebViews
//! - An app-scheme message protocol so page scripts can call native code
//!   through intercepted navigations

pub mod forwarder;
pub mod manager;
pub mod observer;
pub mod protocol;

pub use forwarder::NavigationForwarder;
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};
pub use observer::WebViewObserver;
pub use protocol::{MessageDispatch, ProtocolError, ProtocolMessage};
