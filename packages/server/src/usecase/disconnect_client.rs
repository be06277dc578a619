//! UseCase: クライアント切断処理
//!
//! 接続をレジストリから削除し、残りの参加者に切断通知をブロードキャストします。
//! 既に削除済みの接続については通知を送りません。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, message::leave_notice},
    infrastructure::ConnectionRegistry,
};

use super::error::DisconnectError;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を削除し、切断通知をブロードキャストする
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 切断通知を受け取った接続の数
    /// * `Err(DisconnectError)` - 登録されていなかった
    pub async fn execute(&self, id: &ConnectionId) -> Result<usize, DisconnectError> {
        if !self.registry.remove(id).await {
            return Err(DisconnectError::NotRegistered(id.to_string()));
        }

        let notice = leave_notice(id);
        tracing::info!("{}", notice);
        Ok(self.registry.broadcast(&notice).await)
    }
}
