//! UseCase: 画像共有
//!
//! ## 処理の流れ
//!
//! 1. Base64 をデコード
//! 2. ImageStore に保存し Locator を得る
//! 3. `IMAGE:<name>:<locator>` を全接続にブロードキャスト
//!
//! 1 または 2 が失敗した場合は何もブロードキャストしません。

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    domain::{ImagePayload, ImageStore, Locator, message::image_link},
    infrastructure::ConnectionRegistry,
};

use super::error::ShareImageError;

/// 画像共有のユースケース
pub struct ShareImageUseCase {
    registry: Arc<ConnectionRegistry>,
    image_store: Arc<dyn ImageStore>,
}

impl ShareImageUseCase {
    /// 新しい ShareImageUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            registry,
            image_store,
        }
    }

    /// 画像を保存し、リンクをブロードキャストする
    ///
    /// # Returns
    ///
    /// * `Ok(Locator)` - 保存先への参照
    /// * `Err(ShareImageError)` - デコードまたは保存に失敗（ブロードキャストなし）
    pub async fn execute(&self, payload: ImagePayload) -> Result<Locator, ShareImageError> {
        let bytes = STANDARD.decode(payload.data.trim())?;
        let locator = self.image_store.store(&payload.name, &bytes).await?;

        let link = image_link(&payload.name, &locator);
        tracing::info!("{}", link);
        self.registry.broadcast(&link).await;

        Ok(locator)
    }
}
