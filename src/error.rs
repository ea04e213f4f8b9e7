use thiserror::Error;

/// Top-level error type for profile creation.
#[derive(Debug, Error)]
pub enum PolyprofileError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl PolyprofileError {
    /// Returns `true` when the user declined a prompt rather than something failing.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Selection(_))
    }
}

/// The user cancelled a prompt or picked an entity of the wrong type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection cancelled")]
    Cancelled,

    #[error("selected entity is not a {expected}")]
    Rejected { expected: &'static str },
}

/// Reference-frame values that cannot drive the drawing-to-profile transform.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    #[error("vertical exaggeration must be positive, got {0}")]
    NonPositiveExaggeration(f64),

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

/// Failures surfaced by the host document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("no {0} style is defined in the document")]
    StyleMissing(&'static str),

    #[error("a transaction is already active")]
    TransactionActive,

    #[error("no active transaction")]
    NoTransaction,

    #[error("host operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`PolyprofileError`].
pub type Result<T> = std::result::Result<T, PolyprofileError>;
