use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Code image encoding failed: {0}")]
    CodeImage(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
