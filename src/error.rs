//! Errors returned by this crate's analysis functions.

/// Error type any of the user provided callbacks (`op`, `init_op`, `metric`, ...) may return.
/// It is handed back to the caller untouched, wrapped in [BigOError::Callback].
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for the user provided callbacks
pub type CallbackResult<T = ()> = Result<T, CallbackError>;

/// Reasons why a complexity classification was abandoned.\
/// No partial series nor "best effort" label is ever produced when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum BigOError {
    /// Detected before any sampling begins -- no callback has been called yet
    #[error("Invalid complexity analysis configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// One of the callbacks failed: the analysis was aborted and the callback's error is given back as is
    #[error(transparent)]
    Callback(#[from] CallbackError),

    /// The metric produced a NaN or infinite sample, making the regressions impossible
    #[error("The metric produced a non-finite measurement on run #{run}")]
    NonFiniteMeasurement { run: u32 },
}

impl BigOError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}

/// Signals a [crate::runners::collection::BigOCollection::search()] for a value that isn't there
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Element not found in the collection")]
pub struct ElementNotFound;
