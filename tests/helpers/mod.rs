// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use parking_lot::Mutex;
use rankaudit::domain::models::audit::DeviceClass;
use rankaudit::domain::oracle::search_oracle::{OracleError, OracleResponse, SearchOracle};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};

type Script = Box<dyn Fn(DeviceClass, u32) -> Result<OracleResponse, OracleError> + Send + Sync>;

/// 按设备类型和调用序号返回预设响应的 oracle
pub struct ScriptedOracle {
    script: Script,
    desktop_calls: AtomicU32,
    mobile_calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedOracle {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(DeviceClass, u32) -> Result<OracleResponse, OracleError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            desktop_calls: AtomicU32::new(0),
            mobile_calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// 两个设备都返回同一段文本
    pub fn always(text: String) -> Self {
        Self::new(move |_, _| Ok(OracleResponse::from_text(text.clone())))
    }

    pub fn calls(&self, device: DeviceClass) -> u32 {
        match device {
            DeviceClass::Desktop => self.desktop_calls.load(Ordering::SeqCst),
            DeviceClass::Mobile => self.mobile_calls.load(Ordering::SeqCst),
        }
    }

    /// 收到过的全部提示词
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl SearchOracle for ScriptedOracle {
    async fn generate(&self, prompt: &str) -> Result<OracleResponse, OracleError> {
        let (device, counter) = if prompt.contains("MOBILE MODE") {
            (DeviceClass::Mobile, &self.mobile_calls)
        } else {
            (DeviceClass::Desktop, &self.desktop_calls)
        };
        self.prompts.lock().push(prompt.to_string());
        let call = counter.fetch_add(1, Ordering::SeqCst);
        (self.script)(device, call)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// 生成 `ranks` 中每个排名一条结果；`target_ranks` 中的排名指向 example.com
#[allow(dead_code)]
pub fn results_payload(
    target_rank: Option<u32>,
    ranks: impl IntoIterator<Item = u32>,
    target_ranks: &[u32],
) -> String {
    let results: Vec<Value> = ranks
        .into_iter()
        .map(|rank| {
            let url = if target_ranks.contains(&rank) {
                format!("https://www.example.com/page-{}", rank)
            } else {
                format!("https://competitor{}.com/", rank)
            };
            json!({
                "rank": rank,
                "url": url,
                "title": format!("Result {}", rank),
                "description": format!("Snippet {}", rank),
            })
        })
        .collect();

    json!({
        "targetRank": target_rank,
        "results": results,
        "summary": "Audit complete.",
    })
    .to_string()
}
