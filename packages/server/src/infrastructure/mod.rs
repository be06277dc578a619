//! Infrastructure 層
//!
//! ソケットの読み書き、接続レジストリ、画像の永続化など
//! I/O を伴う具体的な実装を提供します。

pub mod connection;
pub mod image_store;
pub mod registry;

pub use connection::{Connection, ConnectionListener, ConnectionState, SendError};
pub use image_store::FileSystemImageStore;
pub use registry::ConnectionRegistry;
