//! 接続レジストリ
//!
//! ## 責務
//!
//! - 接続中の `Connection` の集合を管理（add / remove）
//! - 全接続へのブロードキャスト
//!
//! ## 排他制御
//!
//! add / remove / broadcast は全て同じ Mutex の下で実行されます。
//! broadcast はロックを保持したまま全接続に送信するため、
//!
//! - ブロードキャスト中に追加された接続はそのメッセージを受け取らない（スナップショット）
//! - 2 つのブロードキャストが交互に書き込まれることはない
//!
//! が保証されます。ロックはこの型の外には公開しません。

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::ConnectionId;

use super::connection::Connection;

/// 接続中のクライアントの集合
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, Arc<Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を登録する
    ///
    /// 既に登録済みの場合は何もせず `false` を返します。
    pub async fn add(&self, connection: Arc<Connection>) -> bool {
        let mut connections = self.connections.lock().await;
        let id = connection.id().clone();
        if connections.contains_key(&id) {
            return false;
        }
        connections.insert(id.clone(), connection);
        tracing::debug!(
            "'{}' registered ({} connections)",
            id,
            connections.len()
        );
        true
    }

    /// 接続を削除する
    ///
    /// 登録されていない場合は何もせず `false` を返します（冪等）。
    pub async fn remove(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!(
                "'{}' unregistered ({} connections)",
                id,
                connections.len()
            );
        }
        removed
    }

    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.lock().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }

    /// 登録中の全接続に 1 行送信する
    ///
    /// 一部の接続への送信失敗は許容し、残りの接続への送信を続けます。
    ///
    /// # Returns
    ///
    /// 送信に成功した接続の数
    pub async fn broadcast(&self, message: &str) -> usize {
        let connections = self.connections.lock().await;

        let mut delivered = 0;
        for (id, connection) in connections.iter() {
            match connection.send(message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to deliver message to '{}': {}", id, e);
                }
            }
        }

        delivered
    }

    /// 全接続を切断する
    ///
    /// 切断はロックの外で行います。各接続の削除は読み取りループの終了時に行われます。
    pub async fn disconnect_all(&self) {
        let snapshot: Vec<Arc<Connection>> =
            self.connections.lock().await.values().cloned().collect();

        tracing::info!("Disconnecting {} connections", snapshot.len());
        for connection in snapshot {
            connection.disconnect().await;
        }
    }
}
