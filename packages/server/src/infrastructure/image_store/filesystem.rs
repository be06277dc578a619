//! ファイルシステムを使った ImageStore 実装
//!
//! 画像は一時ファイル（`.<name>.<n>.part`）に書き込んでからリネームします。
//! 書き込みに失敗した場合、公開される名前のファイルは作られません。
//! `ImageName` は `.` で始まらないため、一時ファイル名と衝突することはありません。

use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;

use crate::domain::{ImageName, ImageStore, ImageStoreError, Locator};

/// ローカルディレクトリに画像を保存する ImageStore
pub struct FileSystemImageStore {
    root: PathBuf,
    next_upload: AtomicU64,
}

impl FileSystemImageStore {
    /// 新しい FileSystemImageStore を作成
    ///
    /// ディレクトリは最初の保存時に作成されます。
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_upload: AtomicU64::new(0),
        }
    }

    fn partial_path(&self, name: &ImageName) -> PathBuf {
        let upload = self.next_upload.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(".{}.{}.part", name, upload))
    }
}

#[async_trait]
impl ImageStore for FileSystemImageStore {
    async fn store(&self, name: &ImageName, bytes: &[u8]) -> Result<Locator, ImageStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let partial = self.partial_path(name);
        if let Err(e) = tokio::fs::write(&partial, bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        let destination = self.root.join(name.as_str());
        if let Err(e) = tokio::fs::rename(&partial, &destination).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        let absolute = tokio::fs::canonicalize(&destination).await?;
        let locator = Locator::from_file_path(&absolute).ok_or_else(|| {
            ImageStoreError::UnrepresentablePath(absolute.display().to_string())
        })?;

        tracing::debug!(
            "Stored image '{}' ({} bytes) at {}",
            name,
            bytes.len(),
            locator
        );
        Ok(locator)
    }
}
