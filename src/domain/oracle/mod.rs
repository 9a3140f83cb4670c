// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Oracle 领域模块
///
/// 定义带搜索落地能力的生成式模型接口。模型本身被视为不可靠的外部服务，
/// 领域层只依赖这里的 trait 和错误类型。
pub mod search_oracle;
