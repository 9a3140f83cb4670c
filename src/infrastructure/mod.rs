// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 地理定位（geolocation）：解析服务器出口 IP 的坐标
/// - 指标（metrics）：Prometheus 指标导出
/// - Oracle（oracle）：搜索落地生成模型的 HTTP 客户端
/// - 仓库实现（repositories）：历史仓库的具体实现
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知具体技术实现。
pub mod geolocation;
pub mod metrics;
pub mod oracle;
pub mod repositories;
