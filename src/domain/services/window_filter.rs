// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::RankedEntry;
use crate::domain::services::prompt_builder::{NEIGHBORHOOD_RADIUS, TOP_RESULTS};

/// 条目是否落在 "前 40 名 ∪ 目标 ±5" 的窗口内
pub fn in_window(rank: u32, target_rank: Option<u32>) -> bool {
    if rank <= TOP_RESULTS {
        return true;
    }
    match target_rank {
        Some(target) => rank.abs_diff(target) <= NEIGHBORHOOD_RADIUS,
        None => false,
    }
}

/// 过滤并按排名升序输出
///
/// 纯过滤：不会补齐缺失的排名。排名相同的条目保持输入顺序（稳定排序）。
pub fn select(results: Vec<RankedEntry>, target_rank: Option<u32>) -> Vec<RankedEntry> {
    let mut kept: Vec<RankedEntry> = results
        .into_iter()
        .filter(|entry| in_window(entry.rank, target_rank))
        .collect();
    kept.sort_by_key(|entry| entry.rank);
    kept
}
