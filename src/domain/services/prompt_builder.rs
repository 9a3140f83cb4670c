// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::audit::{
    Coordinates, DeviceClass, Location, TargetDomain, WorkerConfig,
};

/// 完整列出的自然排名数量
pub const TOP_RESULTS: u32 = 40;

/// 目标排名上下各展示的邻域条数
pub const NEIGHBORHOOD_RADIUS: u32 = 5;

/// 构建审计提示词所需的上下文
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub domain: &'a TargetDomain,
    pub keywords: &'a str,
    pub location: &'a Location,
    pub device: DeviceClass,
    pub coordinates: Option<Coordinates>,
    pub worker: &'a WorkerConfig,
}

/// 生成地理位置说明
pub fn location_instruction(location: &Location, coordinates: Option<Coordinates>) -> String {
    match (location, coordinates) {
        (Location::CurrentLocation, Some(c)) => format!(
            "Location Context: Latitude {}, Longitude {}.",
            c.latitude, c.longitude
        ),
        (Location::CurrentLocation, None) => {
            "Location Context: User's current local IP region.".to_string()
        }
        (Location::Named(name), _) => format!("Location Context: {}.", name),
    }
}

/// 构建审计提示词（纯函数）
///
/// 提示词规定了 oracle 必须遵守的输出约定：只统计自然结果、完整列出前 40 名、
/// 在前 `end_rank` 名中定位目标并给出其 ±5 邻域，以及严格的 JSON 结构。
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    let domain = ctx.domain.as_str();
    let location = location_instruction(ctx.location, ctx.coordinates);
    let depth = ctx.worker.end_rank.max(TOP_RESULTS);
    let radius = NEIGHBORHOOD_RADIUS;

    format!(
        r#"[STRICT ORGANIC SEO AUDIT - {mode} MODE]
Audit the search results for keyword: "{keywords}"
Target Website to track: "{domain}"
{location}

OUTPUT REQUIREMENTS (MUST FOLLOW):
1. IGNORE all Ads, Map Packs, and Shopping widgets. Only count pure "blue link" organic results.
2. TOP {top}: Provide a list of the first {top} organic results (Rank {start} to {top}).
3. TARGET NEIGHBORHOOD: Locate "{domain}" in the top {depth}.
   - If found at Rank X: You MUST provide every rank from X-{radius} to X+{radius} inclusive (never below Rank 1).
   - If NOT found in top {depth}: Just state targetRank as null.
4. FOR EVERY result listed (both in Top {top} and Neighborhood), you MUST include:
   - rank: The organic position number.
   - url: The full URL.
   - title: The page title.
   - description: A concise 1-sentence meta-description based on search results.

JSON FORMAT (respond with this object only):
{{
  "targetRank": number | null,
  "results": [
    {{ "rank": number, "url": "string", "title": "string", "description": "string" }}
  ],
  "summary": "Brief device-specific SEO insight."
}}"#,
        mode = ctx.device.label().to_uppercase(),
        keywords = ctx.keywords,
        domain = domain,
        location = location,
        top = TOP_RESULTS,
        start = ctx.worker.start_rank.max(1),
        depth = depth,
        radius = radius,
    )
}
