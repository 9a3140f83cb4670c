// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含审计用例和请求数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含审计流水线、领域模型、oracle 接口和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供外部服务集成，如 Gemini oracle、历史存储、地理定位和指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供错误类型、重试策略和日志初始化
pub mod utils;
