//! 画像ストアの実装
//!
//! - `filesystem`: ローカルディレクトリに保存し `file://` URI を返す実装

pub mod filesystem;

pub use filesystem::FileSystemImageStore;
