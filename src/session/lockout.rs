use serde::{Deserialize, Serialize};

/// 出拳后的输入锁定窗口，到期即自动解锁。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InputLockout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locked_until: Option<f64>,
}

impl InputLockout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engage(&mut self, now_ms: f64, delay_ms: u32) {
        self.locked_until = Some(now_ms + f64::from(delay_ms));
    }

    pub fn release(&mut self) {
        self.locked_until = None;
    }

    pub fn is_open(&self, now_ms: f64) -> bool {
        self.locked_until.map_or(true, |until| now_ms >= until)
    }

    pub fn remaining_ms(&self, now_ms: f64) -> u32 {
        match self.locked_until {
            Some(until) if until > now_ms => (until - now_ms).ceil() as u32,
            _ => 0,
        }
    }
}
