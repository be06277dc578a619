//! Value Objects
//!
//! 生成時にバリデーションを行い、不正な値が Domain に入り込まないようにします。

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use url::Url;

use super::error::ImageNameError;

/// 画像名の最大長（バイト）
pub const MAX_IMAGE_NAME_BYTES: usize = 255;

static NEXT_CONNECTION_SERIAL: AtomicU64 = AtomicU64::new(1);

/// 接続の識別子
///
/// リモートアドレスのラベルとプロセス内で一意な連番の組です。
/// 同じアドレスから再接続しても別の ID になります。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    serial: u64,
    peer: String,
}

impl ConnectionId {
    /// 新しい ConnectionId を払い出す
    pub fn new(peer: impl fmt::Display) -> Self {
        Self {
            serial: NEXT_CONNECTION_SERIAL.fetch_add(1, Ordering::Relaxed),
            peer: peer.to_string(),
        }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.peer, self.serial)
    }
}

/// 画像名
///
/// ## 不変条件
///
/// - 空文字列ではない
/// - 255 バイト以下
/// - パス区切り文字（`/`, `\`）や `..` を含まない
/// - `.` で始まらない（隠しファイルや保存中の一時ファイルと衝突しない）
/// - 制御文字を含まない
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName(String);

impl ImageName {
    pub fn new(value: String) -> Result<Self, ImageNameError> {
        if value.is_empty() {
            return Err(ImageNameError::Empty);
        }
        if value.len() > MAX_IMAGE_NAME_BYTES {
            return Err(ImageNameError::TooLong(value.len()));
        }
        if value == "." || value.contains("..") || value.contains(['/', '\\']) {
            return Err(ImageNameError::PathTraversal(value));
        }
        if value.starts_with('.') {
            return Err(ImageNameError::LeadingDot(value));
        }
        if value.chars().any(char::is_control) {
            return Err(ImageNameError::ControlCharacter(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ImageName {
    type Error = ImageNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 保存済み画像への参照
///
/// クライアントはこの文字列を使って画像を取得します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 絶対パスから `file://` URI を作る
    ///
    /// 空白や `#`, `?`, `%` などはパーセントエンコードされます。
    pub fn from_file_path(path: &Path) -> Option<Self> {
        let url = Url::from_file_path(path).ok()?;
        Some(Self(url.into()))
    }

    /// `file://` URI であればローカルパスに戻す
    pub fn to_file_path(&self) -> Option<PathBuf> {
        Url::parse(&self.0).ok()?.to_file_path().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
