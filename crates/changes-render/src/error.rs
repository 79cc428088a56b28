use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid base URI: {0}")]
    InvalidBaseUri(#[from] url::ParseError),

    #[error("base URI {0:?} cannot have paths joined to it")]
    OpaqueBaseUri(String),

    #[error("no change is selected in this context")]
    NoChange,

    #[error(transparent)]
    Diff(#[from] changes_diff::ParseError),
}
