//! ImageStore trait 定義
//!
//! 画像の永続化先のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    error::ImageStoreError,
    value_object::{ImageName, Locator},
};

/// 画像ストア
///
/// デコード済みの画像を保存し、クライアントが取得に使う `Locator` を返します。
/// 保存に失敗した場合は `Locator` を返してはいけません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 画像を保存する
    async fn store(&self, name: &ImageName, bytes: &[u8]) -> Result<Locator, ImageStoreError>;
}
