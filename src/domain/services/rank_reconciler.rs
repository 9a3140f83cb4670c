// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::audit::TargetDomain;
use crate::domain::models::search_result::RankedEntry;

/// 结果列表中命中目标域名的最佳（最小）排名
pub fn manual_match(results: &[RankedEntry], target: &TargetDomain) -> Option<u32> {
    results
        .iter()
        .filter(|entry| target.matches(&entry.url))
        .map(|entry| entry.rank)
        .min()
}

/// 计算最终排名
///
/// oracle 自报的排名只是一个声明；结果列表中可以直接观察到的、更好的命中
/// 会覆盖更差或缺失的声明。比任何可观察命中都好的声明保持不变。
pub fn reconcile(
    claimed: Option<u32>,
    results: &[RankedEntry],
    target: &TargetDomain,
) -> Option<u32> {
    match (manual_match(results, target), claimed) {
        (Some(observed), None) => Some(observed),
        (Some(observed), Some(claim)) if observed < claim => Some(observed),
        (_, claim) => claim,
    }
}
