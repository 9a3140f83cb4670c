// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// - 历史仓库（history_repo_impl）：本地 JSON 文件与内存两种实现
pub mod history_repo_impl;
