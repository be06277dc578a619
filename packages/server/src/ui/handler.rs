//! Connection event handlers.
//!
//! `AppState` を `ConnectionListener` として各接続に渡し、
//! 受信した行をテキストと画像に振り分けます。

use std::{io, sync::Arc};

use async_trait::async_trait;

use crate::{
    domain::Message,
    infrastructure::{Connection, ConnectionListener},
    usecase::DisconnectError,
};

use super::state::AppState;

#[async_trait]
impl ConnectionListener for AppState {
    async fn on_connection_ready(&self, connection: &Arc<Connection>) {
        if let Err(e) = self
            .connect_client_usecase
            .execute(connection.clone())
            .await
        {
            tracing::warn!("Failed to register '{}': {}", connection.id(), e);
        }
    }

    async fn on_receive_string(&self, connection: &Arc<Connection>, value: String) {
        match Message::parse(&value) {
            Ok(Message::Text(text)) => {
                self.broadcast_message_usecase.execute(&text).await;
            }
            Ok(Message::Image(payload)) => {
                let name = payload.name.clone();
                if let Err(e) = self.share_image_usecase.execute(payload).await {
                    tracing::warn!(
                        "Rejected image '{}' from '{}': {}",
                        name,
                        connection.id(),
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Rejected malformed image payload from '{}': {}",
                    connection.id(),
                    e
                );
            }
        }
    }

    async fn on_disconnect(&self, connection: &Arc<Connection>) {
        match self
            .disconnect_client_usecase
            .execute(connection.id())
            .await
        {
            Ok(_) => {}
            Err(DisconnectError::NotRegistered(id)) => {
                tracing::debug!("'{}' was already unregistered", id);
            }
        }
    }

    async fn on_exception(&self, connection: &Connection, error: &io::Error) {
        tracing::error!("TCP connection error on '{}': {}", connection.id(), error);
    }
}
