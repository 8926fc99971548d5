//! Errors raised by the value model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid regular expression /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid regular expression flags '{0}'")]
    InvalidFlags(String),
    #[error("value is mutably borrowed and cannot be enumerated")]
    Borrow(#[from] std::cell::BorrowError),
    #[error("converting circular structure to JSON")]
    Cyclic,
}
