//! ConnectionListener trait 定義
//!
//! `Connection` の読み取りループが呼び出すコールバックの契約。
//! サーバー側（UI 層）が実装します。

use std::{io, sync::Arc};

use async_trait::async_trait;

use super::line::Connection;

/// 接続イベントのリスナー
///
/// ## 呼び出し順序
///
/// 1 つの接続につき、読み取りループから次の順で呼び出されます。
///
/// ```text
/// on_connection_ready → on_receive_string* → on_disconnect
/// ```
///
/// `on_exception` は読み取りループ、または送信に失敗したタスクから呼び出されます。
/// `on_disconnect` は終了経路に関わらず必ず 1 回だけ呼び出されます。
#[async_trait]
pub trait ConnectionListener: Send + Sync {
    /// 読み取りループ開始時
    async fn on_connection_ready(&self, connection: &Arc<Connection>);

    /// 1 行受信した時（行末の `\n` / `\r\n` は除去済み）
    async fn on_receive_string(&self, connection: &Arc<Connection>, value: String);

    /// 読み取りループ終了時
    async fn on_disconnect(&self, connection: &Arc<Connection>);

    /// 読み書きの I/O エラー
    async fn on_exception(&self, connection: &Connection, error: &io::Error);
}
