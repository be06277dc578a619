//! UseCase errors.

use thiserror::Error;

use crate::domain::ImageStoreError;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Connection '{0}' is not registered")]
    NotRegistered(String),
}

/// 画像共有のエラー
#[derive(Debug, Error)]
pub enum ShareImageError {
    #[error("Image payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error(transparent)]
    Store(#[from] ImageStoreError),
}
