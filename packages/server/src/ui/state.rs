//! Server state.

use std::sync::Arc;

use crate::usecase::{
    BroadcastMessageUseCase, ConnectClientUseCase, DisconnectClientUseCase, ShareImageUseCase,
};

/// Shared application state
///
/// 各接続の読み取りループから `ConnectionListener` として呼び出されます。
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// BroadcastMessageUseCase（メッセージ送信のユースケース）
    pub broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    /// ShareImageUseCase（画像共有のユースケース）
    pub share_image_usecase: Arc<ShareImageUseCase>,
}
