//! Crate-wide error type.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("invalid object transform: {0}")]
    InvalidTransform(String),

    #[error("failed to load model '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn projection(msg: impl Into<String>) -> Self {
        Self::InvalidProjection(msg.into())
    }

    pub fn camera(msg: impl Into<String>) -> Self {
        Self::InvalidCamera(msg.into())
    }

    pub fn viewport(msg: impl Into<String>) -> Self {
        Self::InvalidViewport(msg.into())
    }

    pub fn transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// Returns `true` for errors caused by bad scene parameters, which are
    /// reported before any frame is drawn.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidProjection(_)
                | Self::InvalidCamera(_)
                | Self::InvalidViewport(_)
                | Self::InvalidTransform(_)
        )
    }
}
