// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Oracle 实现模块
///
/// - Gemini（gemini）：通过 generateContent 接口 + google_search 工具实现搜索落地
pub mod gemini;
