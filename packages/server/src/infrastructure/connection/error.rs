//! Connection errors.

use thiserror::Error;

/// `Connection::send` のエラー
#[derive(Debug, Error)]
pub enum SendError {
    /// 切断処理中または切断済み
    #[error("Connection is closed")]
    Closed,

    /// 書き込みまたはフラッシュに失敗した
    #[error("Failed to write to connection: {0}")]
    Io(#[from] std::io::Error),
}
