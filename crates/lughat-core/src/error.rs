/// Reasons a language draft is refused before reaching the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Language name is required")]
    MissingName,

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Unknown language family: {0}")]
    UnknownFamily(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Only administrators can change the catalog")]
    PermissionDenied,

    #[error("Language not found: {0}")]
    NotFound(String),

    #[error("Invalid language: {0}")]
    Invalid(#[from] DraftError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Backend(String),
}
