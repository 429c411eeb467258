use std::cell::Cell;
use std::rc::Rc;

use web_sys::js_sys::Date;

/// 毫秒时间源，语义同 JS 的 `Date.now()`。
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// 浏览器时钟，只能在 wasm 环境中调用。
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmClock;

impl Clock for WasmClock {
    fn now_ms(&self) -> f64 {
        Date::now()
    }
}

/// 手动推进的时钟，克隆出的句柄共享同一时间。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
