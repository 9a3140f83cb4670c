// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::settings::HistorySettings;
use crate::domain::models::history::HistoryRecord;
use crate::domain::repositories::history_repository::{HistoryRepository, RepositoryError};

/// 本地 JSON 文件历史仓库
///
/// 整个历史列表以一个 JSON 数组保存；读写都通过同一把互斥锁串行化。
pub struct FileHistoryRepository {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl FileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: Mutex::new(()),
        }
    }

    /// 写入过程中使用的临时文件，与历史文件位于同一目录
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_all(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        match fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }

    async fn write_all(&self, records: &[HistoryRecord]) -> Result<(), RepositoryError> {
        // 确保目录存在
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // 先写同目录临时文件再重命名，中途崩溃不会留下截断的历史文件
        let data = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.temp_path();
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for FileHistoryRepository {
    async fn list(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn save(&self, record: &HistoryRecord) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        self.write_all(&records).await
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }
}

/// 内存历史仓库，进程退出后丢失
pub struct InMemoryHistoryRepository {
    records: RwLock<Vec<HistoryRecord>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            capacity,
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn list(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        Ok(self.records.read().clone())
    }

    async fn save(&self, record: &HistoryRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write();
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.records.write().clear();
        Ok(())
    }
}

/// 历史仓库工厂函数
pub fn create_history_repository(
    settings: &HistorySettings,
) -> Result<Arc<dyn HistoryRepository>, RepositoryError> {
    match settings.storage_type.as_str() {
        "file" => Ok(Arc::new(FileHistoryRepository::new(
            settings.path.clone(),
            settings.capacity,
        ))),
        "memory" => Ok(Arc::new(InMemoryHistoryRepository::new(settings.capacity))),
        other => Err(RepositoryError::UnsupportedStorage(other.to_string())),
    }
}
