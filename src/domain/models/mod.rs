// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 审计（audit）：审计请求、设备类型、目标域名和单设备审计结果
/// - 搜索结果（search_result）：单条自然排名结果和落地引用
/// - 历史记录（history）：持久化的审计摘要
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod audit;
pub mod history;
pub mod search_result;
