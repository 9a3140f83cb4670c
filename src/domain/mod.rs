// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：审计请求、结果和历史记录
/// - Oracle 接口（oracle）：搜索落地生成模型的抽象
/// - 仓库接口（repositories）：历史数据持久化抽象接口
/// - 服务（services）：审计流水线和历史服务
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod oracle;
pub mod repositories;
pub mod services;
