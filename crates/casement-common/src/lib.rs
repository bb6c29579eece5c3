pub mod errors;
pub mod id;

pub use errors::CasementError;
pub use id::WebViewId;

pub type Result<T> = std::result::Result<T, CasementError>;
