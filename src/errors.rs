use crate::config::CookieConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Payload too large for cookie {name:?}: {size} bytes (limit {limit})")]
    PayloadTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    #[error("Invalid Set-Cookie header for cookie {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid cookie configuration: {0}")]
    Config(#[from] CookieConfigError),
}
