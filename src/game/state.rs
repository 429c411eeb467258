use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WINS_REQUIRED: u32 = 3;

/// 出拳：石头、布、剪刀。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// 在 `ALL` 中的位置，规则表按此索引。
    pub fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseMoveError {
    pub input: String,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(ParseMoveError { input: s.into() }),
        }
    }
}

/// 单回合结果，只在当回合使用，不会被保存。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Draw,
}

impl Outcome {
    /// 交换双方后的结果。
    pub fn inverted(self) -> Self {
        match self {
            Outcome::PlayerWins => Outcome::ComputerWins,
            Outcome::ComputerWins => Outcome::PlayerWins,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// 比赛阶段，`PlayerWon` 与 `ComputerWon` 为终态。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    PlayerWon,
    ComputerWon,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchStatus::InProgress)
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        MatchStatus::InProgress
    }
}

/// 比赛配置：赢下比赛所需的回合胜场数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    pub wins_required: u32,
}

impl MatchConfig {
    /// 小于 1 时返回 `None`，由调用方决定是否截断。
    pub fn new(wins_required: u32) -> Option<Self> {
        (wins_required >= 1).then_some(Self { wins_required })
    }

    pub fn clamped(wins_required: u32) -> Self {
        Self {
            wins_required: wins_required.max(1),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            wins_required: DEFAULT_WINS_REQUIRED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrityError {
    ZeroThreshold,
    ScoreExceedsThreshold {
        player_wins: u32,
        computer_wins: u32,
        wins_required: u32,
    },
    StatusScoreMismatch {
        status: MatchStatus,
        player_wins: u32,
        computer_wins: u32,
    },
}

/// 当前比分与比赛阶段。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MatchState {
    #[serde(default)]
    pub player_wins: u32,
    #[serde(default)]
    pub computer_wins: u32,
    #[serde(default)]
    pub status: MatchStatus,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// 校验外部传入的状态（例如前端 JSON）是否与配置一致。
    pub fn integrity_check(&self, config: &MatchConfig) -> Result<(), IntegrityError> {
        let required = config.wins_required;
        if required == 0 {
            return Err(IntegrityError::ZeroThreshold);
        }
        if self.player_wins > required || self.computer_wins > required {
            return Err(IntegrityError::ScoreExceedsThreshold {
                player_wins: self.player_wins,
                computer_wins: self.computer_wins,
                wins_required: required,
            });
        }

        let expected = match (self.player_wins == required, self.computer_wins == required) {
            (true, false) => MatchStatus::PlayerWon,
            (false, true) => MatchStatus::ComputerWon,
            (false, false) => MatchStatus::InProgress,
            // 双方同时达到阈值不可能由逐回合推进产生
            (true, true) => {
                return Err(IntegrityError::StatusScoreMismatch {
                    status: self.status,
                    player_wins: self.player_wins,
                    computer_wins: self.computer_wins,
                })
            }
        };
        if expected != self.status {
            return Err(IntegrityError::StatusScoreMismatch {
                status: self.status,
                player_wins: self.player_wins,
                computer_wins: self.computer_wins,
            });
        }

        Ok(())
    }
}

/// 会话事件流。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundPlayed {
        round: u32,
        player_move: Move,
        computer_move: Move,
        outcome: Outcome,
    },
    MatchDecided {
        status: MatchStatus,
        player_wins: u32,
        computer_wins: u32,
    },
    MatchReset,
    Reconfigured {
        wins_required: u32,
        clamped: bool,
    },
}
