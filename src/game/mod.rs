//! 游戏核心逻辑模块（回合判定、比分状态机）。

pub mod rules;
pub mod state;

pub use rules::{resolve, round_message, MatchError, MatchTracker, RoundResolution};
pub use state::{
    GameEvent,
    IntegrityError,
    MatchConfig,
    MatchState,
    MatchStatus,
    Move,
    Outcome,
    ParseMoveError,
    DEFAULT_WINS_REQUIRED,
};
