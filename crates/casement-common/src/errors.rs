#[derive(Debug, thiserror::Error)]
pub enum CasementError {
    #[error("webview error: {0}")]
    WebView(String),

    #[error("message protocol error: {0}")]
    Protocol(String),
}
