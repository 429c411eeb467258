use serde::{Deserialize, Serialize};

use super::state::{
    GameEvent, IntegrityError, MatchConfig, MatchState, MatchStatus, Move, Outcome,
};

use Outcome::{ComputerWins, Draw, PlayerWins};

/// 规则表：行是玩家出拳，列是电脑出拳，顺序同 `Move::ALL`。
const OUTCOME_TABLE: [[Outcome; 3]; 3] = [
    // rock vs rock / paper / scissors
    [Draw, ComputerWins, PlayerWins],
    // paper
    [PlayerWins, Draw, ComputerWins],
    // scissors
    [ComputerWins, PlayerWins, Draw],
];

/// 判定单回合胜负。纯函数，九种组合全部有定义。
pub fn resolve(player: Move, computer: Move) -> Outcome {
    OUTCOME_TABLE[player.index()][computer.index()]
}

/// 页面上显示的回合文案。
pub fn round_message(player: Move, computer: Move, outcome: Outcome) -> String {
    match outcome {
        Outcome::Draw => "Draw !".to_string(),
        Outcome::PlayerWins => format!("You win ! {player} beats {computer}"),
        Outcome::ComputerWins => format!("You lose ! {computer} beats {player}"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchError {
    InvalidConfig { wins_required: u32 },
    MatchAlreadyDecided { status: MatchStatus },
}

/// 一回合结算后交给展示层的数据。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResolution {
    pub round: u32,
    pub player_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
    pub state: MatchState,
    pub message: String,
}

impl RoundResolution {
    pub fn new(
        round: u32,
        player_move: Move,
        computer_move: Move,
        outcome: Outcome,
        state: MatchState,
    ) -> Self {
        Self {
            round,
            player_move,
            computer_move,
            outcome,
            state,
            message: round_message(player_move, computer_move, outcome),
        }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::RoundPlayed {
            round: self.round,
            player_move: self.player_move,
            computer_move: self.computer_move,
            outcome: self.outcome,
        }];
        if self.state.is_finished() {
            events.push(GameEvent::MatchDecided {
                status: self.state.status,
                player_wins: self.state.player_wins,
                computer_wins: self.state.computer_wins,
            });
        }
        events
    }
}

/// 比分状态机，只能通过 `apply`、`reset`、`configure` 修改。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchTracker {
    #[serde(default)]
    config: MatchConfig,
    #[serde(default)]
    state: MatchState,
}

impl MatchTracker {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            state: MatchState::new(),
        }
    }

    /// 从外部数据恢复，先做一致性校验。
    pub fn from_parts(config: MatchConfig, state: MatchState) -> Result<Self, IntegrityError> {
        state.integrity_check(&config)?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status
    }

    pub fn is_decided(&self) -> bool {
        self.state.is_finished()
    }

    /// 阈值小于 1 时拒绝并保持原状态；成功则重置比分。
    pub fn configure(&mut self, wins_required: u32) -> Result<(), MatchError> {
        let config =
            MatchConfig::new(wins_required).ok_or(MatchError::InvalidConfig { wins_required })?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// 截断到至少 1 后生效，返回是否发生了截断。
    pub fn configure_clamped(&mut self, wins_required: u32) -> bool {
        match self.configure(wins_required) {
            Ok(()) => false,
            Err(_) => {
                self.config = MatchConfig::clamped(wins_required);
                self.reset();
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = MatchState::new();
    }

    pub fn apply(&mut self, outcome: Outcome) -> Result<MatchStatus, MatchError> {
        if self.state.is_finished() {
            return Err(MatchError::MatchAlreadyDecided {
                status: self.state.status,
            });
        }

        let required = self.config.wins_required;
        match outcome {
            Outcome::Draw => {}
            Outcome::PlayerWins => {
                self.state.player_wins += 1;
                if self.state.player_wins >= required {
                    self.state.status = MatchStatus::PlayerWon;
                }
            }
            Outcome::ComputerWins => {
                self.state.computer_wins += 1;
                if self.state.computer_wins >= required {
                    self.state.status = MatchStatus::ComputerWon;
                }
            }
        }

        Ok(self.state.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_rule_table_for_all_pairs() {
        use Move::{Paper, Rock, Scissors};

        assert_eq!(resolve(Rock, Rock), Draw);
        assert_eq!(resolve(Rock, Paper), ComputerWins);
        assert_eq!(resolve(Rock, Scissors), PlayerWins);
        assert_eq!(resolve(Paper, Rock), PlayerWins);
        assert_eq!(resolve(Paper, Paper), Draw);
        assert_eq!(resolve(Paper, Scissors), ComputerWins);
        assert_eq!(resolve(Scissors, Rock), ComputerWins);
        assert_eq!(resolve(Scissors, Paper), PlayerWins);
        assert_eq!(resolve(Scissors, Scissors), Draw);
    }

    #[test]
    fn resolve_is_symmetric_under_swap() {
        for a in Move::ALL {
            for b in Move::ALL {
                assert_eq!(
                    resolve(a, b),
                    resolve(b, a).inverted(),
                    "swapping {a} and {b} should invert the outcome"
                );
                assert_eq!(
                    resolve(a, b) == PlayerWins,
                    resolve(b, a) == ComputerWins
                );
            }
        }
    }

    #[test]
    fn round_messages_follow_page_wording() {
        assert_eq!(round_message(Move::Rock, Move::Rock, Draw), "Draw !");
        assert_eq!(
            round_message(Move::Rock, Move::Scissors, PlayerWins),
            "You win ! rock beats scissors"
        );
        assert_eq!(
            round_message(Move::Rock, Move::Paper, ComputerWins),
            "You lose ! paper beats rock"
        );
    }

    #[test]
    fn player_reaches_threshold_after_three_wins() {
        let mut tracker = MatchTracker::new(MatchConfig::default());

        let status = tracker.apply(PlayerWins).expect("first win should apply");
        assert_eq!(status, MatchStatus::InProgress);
        assert_eq!(tracker.state().player_wins, 1);

        let status = tracker.apply(PlayerWins).expect("second win should apply");
        assert_eq!(status, MatchStatus::InProgress);
        assert_eq!(tracker.state().player_wins, 2);

        let status = tracker.apply(PlayerWins).expect("third win should apply");
        assert_eq!(status, MatchStatus::PlayerWon);
        assert!(tracker.is_decided());
    }

    #[test]
    fn computer_win_is_symmetric() {
        let mut tracker = MatchTracker::new(MatchConfig::clamped(2));
        tracker.apply(ComputerWins).expect("should apply");
        tracker.apply(PlayerWins).expect("should apply");
        let status = tracker.apply(ComputerWins).expect("should apply");
        assert_eq!(status, MatchStatus::ComputerWon);
        assert_eq!(tracker.state().computer_wins, 2);
        assert_eq!(tracker.state().player_wins, 1);
    }

    #[test]
    fn draw_leaves_state_unchanged() {
        let mut tracker = MatchTracker::new(MatchConfig::default());
        tracker.apply(PlayerWins).expect("should apply");
        let before = *tracker.state();
        let status = tracker.apply(Draw).expect("draw should apply");
        assert_eq!(status, MatchStatus::InProgress);
        assert_eq!(*tracker.state(), before);
    }

    #[test]
    fn apply_after_decision_is_rejected_without_mutation() {
        let mut tracker = MatchTracker::new(MatchConfig::clamped(1));
        tracker.apply(ComputerWins).expect("should apply");
        let decided = *tracker.state();

        for outcome in [PlayerWins, ComputerWins, Draw] {
            let error = tracker.apply(outcome).expect_err("decided match should reject");
            assert_eq!(
                error,
                MatchError::MatchAlreadyDecided {
                    status: MatchStatus::ComputerWon
                }
            );
            assert_eq!(*tracker.state(), decided, "score should not change");
        }
    }

    #[test]
    fn configure_zero_is_rejected_then_clamped() {
        let mut tracker = MatchTracker::new(MatchConfig::default());
        tracker.apply(PlayerWins).expect("should apply");

        let error = tracker.configure(0).expect_err("zero threshold should fail");
        assert_eq!(error, MatchError::InvalidConfig { wins_required: 0 });
        assert_eq!(tracker.config().wins_required, 3, "failed configure is a no-op");
        assert_eq!(tracker.state().player_wins, 1, "failed configure is a no-op");

        let clamped = tracker.configure_clamped(0);
        assert!(clamped);
        assert_eq!(tracker.config().wins_required, 1);
        assert_eq!(*tracker.state(), MatchState::new());
    }

    #[test]
    fn configure_mid_match_resets_score() {
        let mut tracker = MatchTracker::new(MatchConfig::default());
        tracker.apply(PlayerWins).expect("should apply");
        tracker.apply(ComputerWins).expect("should apply");
        tracker.configure(5).expect("valid threshold");
        assert_eq!(tracker.config().wins_required, 5);
        assert_eq!(*tracker.state(), MatchState::new());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut tracker = MatchTracker::new(MatchConfig::clamped(2));
        let _ = tracker.apply(PlayerWins);
        let _ = tracker.apply(Draw);
        let _ = tracker.apply(PlayerWins);
        let _ = tracker.apply(ComputerWins);
        assert!(tracker.is_decided());

        tracker.reset();
        assert_eq!(
            *tracker.state(),
            MatchState {
                player_wins: 0,
                computer_wins: 0,
                status: MatchStatus::InProgress,
            }
        );
        assert!(tracker.apply(ComputerWins).is_ok(), "play resumes after reset");
    }

    #[test]
    fn from_parts_rejects_inconsistent_state() {
        let bad = MatchState {
            player_wins: 5,
            computer_wins: 0,
            status: MatchStatus::PlayerWon,
        };
        assert!(matches!(
            MatchTracker::from_parts(MatchConfig::default(), bad),
            Err(IntegrityError::ScoreExceedsThreshold { .. })
        ));
    }

    #[test]
    fn resolution_emits_decision_event_on_final_round() {
        let state = MatchState {
            player_wins: 3,
            computer_wins: 0,
            status: MatchStatus::PlayerWon,
        };
        let resolution = RoundResolution::new(3, Move::Paper, Move::Rock, PlayerWins, state);
        let events = resolution.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            GameEvent::MatchDecided {
                status: MatchStatus::PlayerWon,
                ..
            }
        ));
    }
}
