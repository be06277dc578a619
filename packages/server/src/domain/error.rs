//! Domain errors.

use thiserror::Error;

/// 画像名のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageNameError {
    #[error("Image name is empty")]
    Empty,

    #[error("Image name is too long ({0} bytes)")]
    TooLong(usize),

    #[error("Image name '{0}' contains a path separator or traversal sequence")]
    PathTraversal(String),

    #[error("Image name '{0}' must not start with '.'")]
    LeadingDot(String),

    #[error("Image name '{0}' contains a control character")]
    ControlCharacter(String),
}

/// 受信した行の解釈エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Image payload is missing the ':' before its data")]
    MissingImageData,

    #[error("Invalid image name: {0}")]
    InvalidImageName(#[from] ImageNameError),
}

/// 画像ストアのエラー
#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("Failed to persist image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored image path '{0}' cannot be expressed as a locator")]
    UnrepresentablePath(String),
}
