// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::audit::{AuditRequest, DualAuditOutcome};
use crate::domain::models::history::HistoryRecord;
use crate::domain::repositories::history_repository::{HistoryRepository, RepositoryError};

const CSV_HEADERS: [&str; 7] = [
    "Timestamp",
    "Website",
    "Keywords",
    "Engine",
    "State",
    "Target Rank",
    "Summary",
];

/// 审计历史服务
pub struct HistoryService {
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    /// 把一次完成的审计记入历史
    pub async fn record(
        &self,
        request: &AuditRequest,
        outcome: &DualAuditOutcome,
    ) -> Result<HistoryRecord, RepositoryError> {
        let record = HistoryRecord::from_audit(request, outcome);
        self.repository.save(&record).await?;
        info!("Recorded audit history {} for {}", record.id, record.website);
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        self.repository.list().await
    }

    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.repository.clear().await?;
        info!("Audit history cleared");
        Ok(())
    }
}

/// 导出 CSV，每个单元格都加引号，内部引号加倍
pub fn export_csv(records: &[HistoryRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for record in records {
        let rank = record
            .target_rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Not Found".to_string());
        let cells = [
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.website.clone(),
            record.keywords.clone(),
            record.engine.to_string(),
            record.state.clone(),
            rank,
            record.summary.clone(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| quote(cell)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// 导出文件名，例如 `seo_search_history_2025-01-31.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("seo_search_history_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
