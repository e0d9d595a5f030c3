//! Error types module
//!
//! Codec operations are total over their inputs; malformed paths degrade gracefully
//! during decode instead of failing. The only hard failure is a missing or invalid
//! address-prefix configuration, which aborts the enclosing operation and is never
//! worth retrying.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}
