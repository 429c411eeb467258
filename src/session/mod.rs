//! 展示层协作者：输入锁定、时钟注入与会话配置。

pub mod clock;
pub mod config;
pub mod controller;
pub mod lockout;

pub use clock::{Clock, ManualClock, WasmClock};
pub use config::{SessionConfig, DEFAULT_MOVE_DELAY_MS};
pub use controller::{Announcement, GameSession, SessionError};
pub use lockout::InputLockout;
