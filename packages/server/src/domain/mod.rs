//! Domain 層
//!
//! リレーサーバーが扱う値オブジェクト、メッセージ文法、
//! および外部コラボレーター（画像ストア）のインターフェースを定義します。

pub mod error;
pub mod image_store;
pub mod message;
pub mod value_object;

pub use error::{ImageNameError, ImageStoreError, MessageError};
pub use image_store::ImageStore;
pub use message::{ImagePayload, Message};
pub use value_object::{ConnectionId, ImageName, Locator};
