// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::{AuditRequest, DualAuditOutcome, SearchEngineKind};

/// 审计历史记录
///
/// 只保存一次审计的摘要，不保存完整的结果列表。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub website: String,
    pub keywords: String,
    /// 审计时选择的地点（州名或当前位置哨兵值）
    pub state: String,
    pub engine: SearchEngineKind,
    /// 桌面端的最终排名
    pub target_rank: Option<u32>,
    pub summary: String,
    #[serde(default)]
    pub use_location: bool,
}

impl HistoryRecord {
    /// 根据一次完成的审计构建历史记录
    pub fn from_audit(request: &AuditRequest, outcome: &DualAuditOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            website: request.website.clone(),
            keywords: request.keywords.clone(),
            state: request.location.as_str().to_string(),
            engine: request.engine,
            target_rank: outcome.desktop.target_rank,
            summary: format!(
                "PC: #{} | Mob: #{}",
                rank_label(outcome.desktop.target_rank),
                rank_label(outcome.mobile.target_rank)
            ),
            use_location: request.location.is_current(),
        }
    }
}

fn rank_label(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string())
}
