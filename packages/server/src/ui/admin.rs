//! Administrator input.
//!
//! ローカルの入力（通常は標準入力）から 1 行ずつ読み、
//! `Administrator: ` を付けて全接続にブロードキャストします。

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{domain::message::admin_message, usecase::BroadcastMessageUseCase};

/// 管理者入力をブロードキャストに流し込むタスク
pub struct AdminInputFeeder {
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
}

impl AdminInputFeeder {
    pub fn new(broadcast_message_usecase: Arc<BroadcastMessageUseCase>) -> Self {
        Self {
            broadcast_message_usecase,
        }
    }

    /// 入力が終わるまで読み続ける
    ///
    /// EOF や読み取りエラーで終了しますが、サーバーは動き続けます。
    pub async fn run<R>(self, input: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    self.broadcast_message_usecase
                        .execute(&admin_message(&line))
                        .await;
                }
                Ok(None) => {
                    tracing::info!("Administrator input closed");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read administrator input: {}", e);
                    break;
                }
            }
        }
    }
}
