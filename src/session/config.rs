use serde::{Deserialize, Serialize};

use crate::game::{MatchConfig, DEFAULT_WINS_REQUIRED};

pub const DEFAULT_MOVE_DELAY_MS: u32 = 2_000;

/// 会话配置，由前端以 JSON 传入，缺省字段取默认值。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub wins_required: u32,
    pub move_delay_ms: u32,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: SessionConfig = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// 胜场阈值至少为 1，与页面的静默截断一致。
    pub fn clamped(mut self) -> Self {
        self.wins_required = self.wins_required.max(1);
        self
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::clamped(self.wins_required)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wins_required: DEFAULT_WINS_REQUIRED,
            move_delay_ms: DEFAULT_MOVE_DELAY_MS,
        }
    }
}
