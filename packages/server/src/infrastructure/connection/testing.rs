//! Test helpers for connection-level tests.

use std::{
    io,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncWrite, BufReader, DuplexStream},
    sync::mpsc,
    task::JoinHandle,
};

use crate::domain::ConnectionId;

use super::{Connection, ConnectionListener};

const EVENT_TIMEOUT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(100);
const LINE_TIMEOUT: Duration = Duration::from_secs(5);
const TAG_PADDING: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerEvent {
    Ready(ConnectionId),
    Received(ConnectionId, String),
    Disconnected(ConnectionId),
    Exception(ConnectionId),
}

/// Records every callback into a channel.
pub(crate) struct RecordingListener {
    events: mpsc::UnboundedSender<ListenerEvent>,
}

impl RecordingListener {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ListenerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { events }), rx)
    }
}

#[async_trait]
impl ConnectionListener for RecordingListener {
    async fn on_connection_ready(&self, connection: &Arc<Connection>) {
        let _ = self
            .events
            .send(ListenerEvent::Ready(connection.id().clone()));
    }

    async fn on_receive_string(&self, connection: &Arc<Connection>, value: String) {
        let _ = self
            .events
            .send(ListenerEvent::Received(connection.id().clone(), value));
    }

    async fn on_disconnect(&self, connection: &Arc<Connection>) {
        let _ = self
            .events
            .send(ListenerEvent::Disconnected(connection.id().clone()));
    }

    async fn on_exception(&self, connection: &Connection, _error: &io::Error) {
        let _ = self
            .events
            .send(ListenerEvent::Exception(connection.id().clone()));
    }
}

/// A writer whose every write fails.
pub(crate) struct FailingWriter;

impl AsyncWrite for FailingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "peer went away",
        )))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Spawn a connection over an in-memory pipe and return the client end.
pub(crate) fn duplex_connection(
    listener: Arc<dyn ConnectionListener>,
) -> (Arc<Connection>, DuplexStream) {
    duplex_connection_with_capacity(listener, 4096)
}

pub(crate) fn duplex_connection_with_capacity(
    listener: Arc<dyn ConnectionListener>,
    capacity: usize,
) -> (Arc<Connection>, DuplexStream) {
    let (client, server) = tokio::io::duplex(capacity);
    let (reader, writer) = tokio::io::split(server);
    let connection = Connection::spawn(ConnectionId::new("duplex"), reader, writer, listener);
    (connection, client)
}

/// A connection whose writes always fail. The returned stream keeps its reader open.
pub(crate) fn failing_connection(
    listener: Arc<dyn ConnectionListener>,
) -> (Arc<Connection>, DuplexStream) {
    let (client, server) = tokio::io::duplex(64);
    let connection = Connection::spawn(ConnectionId::new("failing"), server, FailingWriter, listener);
    (connection, client)
}

pub(crate) async fn next_event(
    events: &mut mpsc::UnboundedReceiver<ListenerEvent>,
) -> ListenerEvent {
    tokio::time::timeout(EVENT_TIMEOUT, events.recv())
        .await
        .expect("timed out waiting for listener event")
        .expect("listener channel closed")
}

pub(crate) async fn assert_no_event(events: &mut mpsc::UnboundedReceiver<ListenerEvent>) {
    if let Ok(Some(event)) = tokio::time::timeout(QUIET_PERIOD, events.recv()).await {
        panic!("unexpected listener event: {:?}", event);
    }
}

/// Read `count` lines from the client end in a background task.
pub(crate) fn collect_lines(client: DuplexStream, count: usize) -> JoinHandle<Vec<String>> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(client).lines();
        let mut received = Vec::with_capacity(count);
        while received.len() < count {
            let line = tokio::time::timeout(LINE_TIMEOUT, lines.next_line())
                .await
                .expect("timed out waiting for line")
                .expect("read failed")
                .expect("connection closed");
            received.push(line);
        }
        received
    })
}

/// A long line identifying its producer and sequence number.
pub(crate) fn tagged_line(producer: usize, seq: usize) -> String {
    format!("{}:{}:{}", producer, seq, "x".repeat(TAG_PADDING))
}

/// Parse a line built by [`tagged_line`], panicking if it arrived torn.
pub(crate) fn parse_tagged_line(line: &str) -> (usize, usize) {
    let mut fields = line.splitn(3, ':');
    let producer = fields.next().and_then(|f| f.parse().ok());
    let seq = fields.next().and_then(|f| f.parse().ok());
    let padding = fields.next();
    match (producer, seq, padding) {
        (Some(producer), Some(seq), Some(padding))
            if padding.len() == TAG_PADDING && padding.bytes().all(|b| b == b'x') =>
        {
            (producer, seq)
        }
        _ => panic!("torn line: {:?}", line),
    }
}

/// Assert that every producer's lines arrived complete and in issue order.
pub(crate) fn assert_in_issue_order(lines: &[String], producers: usize, per_producer: usize) {
    let mut next_seq = vec![0; producers];
    for line in lines {
        let (producer, seq) = parse_tagged_line(line);
        assert_eq!(seq, next_seq[producer], "producer {} out of order", producer);
        next_seq[producer] += 1;
    }
    assert_eq!(next_seq, vec![per_producer; producers]);
}
