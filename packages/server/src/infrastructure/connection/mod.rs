//! 接続（1 クライアント = 1 ソケット）
//!
//! ## 概要
//!
//! - `line`: 行単位で読み書きする `Connection` と専用の読み取りループ
//! - `listener`: `Connection` が呼び出すコールバックの契約
//! - `error`: 送信エラー

pub mod error;
pub mod line;
pub mod listener;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SendError;
pub use line::{Connection, ConnectionState, LINE_TERMINATOR};
pub use listener::ConnectionListener;
