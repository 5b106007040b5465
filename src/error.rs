use thiserror::Error;

/// Top-level error type for the geopolar crate.
#[derive(Debug, Error)]
pub enum GeopolarError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Errors raised while building a point from external input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unsupported input type: {0}")]
    UnsupportedInputType(String),

    #[error("invalid coordinate literal {literal:?}: {reason}")]
    InvalidLiteral { literal: String, reason: String },
}

/// Errors related to ordered point collections.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("reference point doesn't belong to the polyline")]
    ReferenceNotFound,
}

/// Convenience type alias for results using [`GeopolarError`].
pub type Result<T> = std::result::Result<T, GeopolarError>;
