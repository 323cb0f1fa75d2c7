//! Error types for widget construction

use thiserror::Error;

/// Why a carousel could not be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    /// A required option was never set; fatal for the whole factory
    #[error("{0} not found in options")]
    MissingOption(&'static str),

    /// An option was set to a value the carousel cannot work with
    #[error("invalid value for {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// A required element is absent; the mount point is skipped
    #[error("{selector} not found in the document")]
    TargetNotFound { selector: String },
}

impl CarouselError {
    /// Configuration problems abort construction; missing targets do not
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CarouselError::TargetNotFound { .. })
    }
}
