//! Server execution logic.

use std::{future::Future, sync::Arc};

use tokio::{io::AsyncBufRead, net::TcpListener};

use crate::infrastructure::{Connection, ConnectionListener, ConnectionRegistry};

use super::{admin::AdminInputFeeder, error::ServerError, signal::shutdown_signal, state::AppState};

type AdminInput = Box<dyn AsyncBufRead + Send + Unpin>;

/// TCP relay server
///
/// This struct owns the accept loop and the administrator input task.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, registry)
///     .with_admin_input(BufReader::new(tokio::io::stdin()));
/// server.run("0.0.0.0", 8189).await?;
/// ```
pub struct Server {
    /// 各接続のリスナー（ユースケースの集合）
    state: Arc<AppState>,
    /// シャットダウン時に全接続を切断するためのレジストリ
    registry: Arc<ConnectionRegistry>,
    admin_input: Option<AdminInput>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `state` - Use cases invoked by every connection
    /// * `registry` - The registry shared by those use cases
    pub fn new(state: Arc<AppState>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            state,
            registry,
            admin_input: None,
        }
    }

    /// Broadcast every line read from `input` as an administrator message
    pub fn with_admin_input<R>(mut self, input: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        self.admin_input = Some(Box::new(input));
        self
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8189)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Accept connections on `listener` until `shutdown` resolves
    ///
    /// On shutdown the administrator input task is stopped and every live
    /// connection is disconnected.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let admin_task = self.admin_input.map(|input| {
            let feeder = AdminInputFeeder::new(self.state.broadcast_message_usecase.clone());
            tokio::spawn(feeder.run(input))
        });

        let connection_listener: Arc<dyn ConnectionListener> = self.state.clone();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let connection =
                            Connection::accept(stream, peer, connection_listener.clone());
                        tracing::info!("New connection: {}", connection);
                    }
                    Err(e) => {
                        tracing::error!("Failed to accept connection: {}", e);
                    }
                },
            }
        }

        if let Some(task) = admin_task {
            task.abort();
        }
        self.registry.disconnect_all().await;
    }
}
