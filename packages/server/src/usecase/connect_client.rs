//! UseCase: クライアント接続処理
//!
//! 接続をレジストリに登録し、全員（本人を含む）に接続通知をブロードキャストします。

use std::sync::Arc;

use crate::{
    domain::message::join_notice,
    infrastructure::{Connection, ConnectionRegistry},
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を登録し、接続通知をブロードキャストする
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 接続通知を受け取った接続の数
    /// * `Err(ConnectError)` - 既に登録済み
    pub async fn execute(&self, connection: Arc<Connection>) -> Result<usize, ConnectError> {
        let id = connection.id().clone();
        if !self.registry.add(connection).await {
            return Err(ConnectError::AlreadyRegistered(id.to_string()));
        }

        let notice = join_notice(&id);
        tracing::info!("{}", notice);
        Ok(self.registry.broadcast(&notice).await)
    }
}
