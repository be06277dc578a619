//! 行単位の接続
//!
//! ## 責務
//!
//! - ソケットを読み取り側と書き込み側に分割し、読み取り側を専用タスクで回す
//! - 書き込みは接続ごとの Mutex で直列化する（ブロードキャストと送信エラー処理が並行しうる）
//! - 切断は冪等で、読み取りループ内からも外部からも呼び出せる
//!
//! ## 状態遷移
//!
//! ```text
//! Created → Ready → Running → Closing → Closed
//! ```
//!
//! `Closed` は終端状態です。

use std::{
    fmt, io,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter},
    net::TcpStream,
    sync::{Mutex, Notify},
};

use crate::domain::ConnectionId;

use super::{error::SendError, listener::ConnectionListener};

/// 送信時に付与する行末
pub const LINE_TERMINATOR: &str = "\r\n";

type BoxedWriter = BufWriter<Box<dyn AsyncWrite + Send + Unpin>>;

/// 接続の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Created = 0,
    Ready = 1,
    Running = 2,
    Closing = 3,
    Closed = 4,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Ready,
            2 => Self::Running,
            3 => Self::Closing,
            _ => Self::Closed,
        }
    }

    fn is_closing_or_closed(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

/// 1 クライアントとの接続
pub struct Connection {
    id: ConnectionId,
    state: AtomicU8,
    /// `None` は書き込み側を閉じた後
    writer: Mutex<Option<BoxedWriter>>,
    /// 読み取りループへの停止通知
    shutdown: Notify,
    listener: Arc<dyn ConnectionListener>,
}

impl Connection {
    /// accept したソケットから接続を作り、読み取りループを開始する
    pub fn accept(
        stream: TcpStream,
        peer: SocketAddr,
        listener: Arc<dyn ConnectionListener>,
    ) -> Arc<Self> {
        let (reader, writer) = stream.into_split();
        Self::spawn(ConnectionId::new(peer), reader, writer, listener)
    }

    /// 任意のストリームの組から接続を作り、読み取りループを開始する
    ///
    /// 読み取り側の所有権は読み取りループに移ります。
    pub fn spawn<R, W>(
        id: ConnectionId,
        reader: R,
        writer: W,
        listener: Arc<dyn ConnectionListener>,
    ) -> Arc<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let writer: Box<dyn AsyncWrite + Send + Unpin> = Box::new(writer);
        let connection = Arc::new(Self {
            id,
            state: AtomicU8::new(ConnectionState::Created as u8),
            writer: Mutex::new(Some(BufWriter::new(writer))),
            shutdown: Notify::new(),
            listener,
        });

        tokio::spawn(Self::read_loop(connection.clone(), BufReader::new(reader)));

        connection
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_closed(&self) -> bool {
        self.state().is_closing_or_closed()
    }

    /// 1 行送信する
    ///
    /// 行末に `\r\n` を付けて書き込み、フラッシュします。
    /// I/O エラー時はリスナーの `on_exception` を呼び出してから切断します。
    pub async fn send(&self, text: &str) -> Result<(), SendError> {
        if self.is_closed() {
            return Err(SendError::Closed);
        }

        let result = {
            let mut guard = self.writer.lock().await;
            let Some(writer) = guard.as_mut() else {
                return Err(SendError::Closed);
            };
            write_line(writer, text).await
        };

        // The writer lock must be released before disconnecting.
        if let Err(e) = result {
            self.listener.on_exception(self, &e).await;
            self.disconnect().await;
            return Err(SendError::Io(e));
        }

        Ok(())
    }

    /// 切断する
    ///
    /// 2 回目以降の呼び出しは何もしません。
    pub async fn disconnect(&self) {
        let transitioned = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if ConnectionState::from_u8(current).is_closing_or_closed() {
                    None
                } else {
                    Some(ConnectionState::Closing as u8)
                }
            })
            .is_ok();
        if !transitioned {
            return;
        }

        tracing::debug!("Disconnecting '{}'", self.id);
        // notify_one stores a permit, so a read loop that is not yet waiting still sees it.
        self.shutdown.notify_one();
        self.close_writer().await;
    }

    async fn read_loop<R>(connection: Arc<Self>, reader: BufReader<R>)
    where
        R: AsyncRead + Unpin,
    {
        connection.advance(ConnectionState::Created, ConnectionState::Ready);
        connection.listener.on_connection_ready(&connection).await;
        connection.advance(ConnectionState::Ready, ConnectionState::Running);

        if let Err(e) = Self::read_lines(&connection, reader).await {
            connection.listener.on_exception(&connection, &e).await;
        }

        connection.close_writer().await;
        connection
            .state
            .store(ConnectionState::Closed as u8, Ordering::Release);
        tracing::debug!("Read loop for '{}' finished", connection.id);

        connection.listener.on_disconnect(&connection).await;
    }

    async fn read_lines<R>(connection: &Arc<Self>, reader: BufReader<R>) -> io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                _ = connection.shutdown.notified() => {
                    return Ok(());
                }
                line = lines.next_line() => match line? {
                    Some(line) => {
                        connection.listener.on_receive_string(connection, line).await;
                    }
                    None => {
                        tracing::debug!("'{}' reached end of stream", connection.id);
                        return Ok(());
                    }
                },
            }
        }
    }

    async fn close_writer(&self) {
        let writer = self.writer.lock().await.take();
        if let Some(mut writer) = writer
            && let Err(e) = writer.shutdown().await
        {
            tracing::debug!("Failed to shut down writer for '{}': {}", self.id, e);
        }
    }

    fn advance(&self, from: ConnectionState, to: ConnectionState) {
        let _ = self.state.compare_exchange(
            from as u8,
            to as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connection {}", self.id)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

async fn write_line<W>(writer: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(LINE_TERMINATOR.as_bytes()).await?;
    writer.flush().await
}
