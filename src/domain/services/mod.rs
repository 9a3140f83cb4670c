// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含排名审计的核心业务逻辑：
/// - 提示词构建（prompt_builder）：生成发给 oracle 的审计提示词
/// - 响应解析（response_parser）：清洗并归一化 oracle 的 JSON 输出
/// - 排名校正（rank_reconciler）：用可观察的命中修正 oracle 自报的排名
/// - 窗口过滤（window_filter）：保留前 40 名和目标邻域
/// - 搜索链接（search_url）：生成可直接打开的搜索结果页链接
/// - 审计编排（audit_service）：并发执行桌面端与移动端审计
/// - 历史服务（history_service）：记录、查询和导出审计历史
pub mod audit_service;
pub mod history_service;
pub mod prompt_builder;
pub mod rank_reconciler;
pub mod response_parser;
pub mod search_url;
pub mod window_filter;
