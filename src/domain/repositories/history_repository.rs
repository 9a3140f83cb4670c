// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::history::HistoryRecord;

/// 历史仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 不支持的存储类型
    #[error("Unsupported history storage type: {0}")]
    UnsupportedStorage(String),
}

/// 审计历史仓库特质
///
/// 记录按时间倒序保存，超出容量的最旧记录会被丢弃。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 返回全部记录（最新在前）
    async fn list(&self) -> Result<Vec<HistoryRecord>, RepositoryError>;

    /// 在最前面插入一条记录
    async fn save(&self, record: &HistoryRecord) -> Result<(), RepositoryError>;

    /// 清空全部记录
    async fn clear(&self) -> Result<(), RepositoryError>;
}
