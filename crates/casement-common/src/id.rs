use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one WebView instance for the lifetime of the process.
///
/// Notifications carry this id instead of a reference to the platform
/// control, so observers stay independent of the UI toolkit's object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebViewId(pub u32);

impl fmt::Display for WebViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "webview-{}", self.0)
    }
}
