//! Utility modules
//!
//! - [`error`] - unified application error and response types
//! - [`result`] - Result type aliases
//! - [`logger`] - tracing setup
//! - [`time`] - calendar helpers for plans and validity windows

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, AppResponse, ok};
pub use result::AppResult;
