//! UseCase: メッセージのブロードキャスト
//!
//! クライアントのテキスト、管理者入力、通知など、全ての配信はここを通ります。

use std::sync::Arc;

use crate::infrastructure::ConnectionRegistry;

/// メッセージ送信のユースケース
pub struct BroadcastMessageUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージを全接続に送信する
    ///
    /// # Returns
    ///
    /// 送信に成功した接続の数
    pub async fn execute(&self, message: &str) -> usize {
        tracing::info!("{}", message);
        let delivered = self.registry.broadcast(message).await;
        tracing::debug!("Broadcast delivered to {} connections", delivered);
        delivered
    }
}
