//! UseCase 層
//!
//! 接続・切断・メッセージ送信・画像共有の各ユースケースを提供します。

pub mod broadcast_message;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod share_image;

pub use broadcast_message::BroadcastMessageUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, DisconnectError, ShareImageError};
pub use share_image::ShareImageUseCase;
