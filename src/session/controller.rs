use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::config::SessionConfig;
use super::lockout::InputLockout;
use crate::ai::ComputerAgent;
use crate::game::{
    resolve, GameEvent, MatchError, MatchState, MatchStatus, MatchTracker, Move, RoundResolution,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionError {
    InputLocked { remaining_ms: u32 },
    Match { error: MatchError },
}

impl From<MatchError> for SessionError {
    fn from(error: MatchError) -> Self {
        SessionError::Match { error }
    }
}

/// 页面横幅上显示的内容。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Announcement {
    Play,
    Round { message: String },
    PlayerWonMatch,
    ComputerWonMatch,
}

impl Announcement {
    pub fn message(&self) -> &str {
        match self {
            Announcement::Play => "Play !",
            Announcement::Round { message } => message.as_str(),
            Announcement::PlayerWonMatch => "Result : You win !!",
            Announcement::ComputerWonMatch => "Result : You lose.",
        }
    }
}

/// 一局游戏会话：比分状态机 + 电脑对手 + 输入锁定。
pub struct GameSession<C: Clock> {
    config: SessionConfig,
    tracker: MatchTracker,
    agent: ComputerAgent,
    lockout: InputLockout,
    clock: C,
    round: u32,
    last_message: Option<String>,
    event_log: Vec<GameEvent>,
}

impl<C: Clock> GameSession<C> {
    pub fn new(config: SessionConfig, clock: C) -> Self {
        Self::with_agent(config, clock, ComputerAgent::new())
    }

    pub fn with_agent(config: SessionConfig, clock: C, agent: ComputerAgent) -> Self {
        let config = config.clamped();
        Self {
            tracker: MatchTracker::new(config.match_config()),
            config,
            agent,
            lockout: InputLockout::new(),
            clock,
            round: 0,
            last_message: None,
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &MatchTracker {
        &self.tracker
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn event_log(&self) -> &[GameEvent] {
        &self.event_log
    }

    pub fn input_enabled(&self) -> bool {
        !self.tracker.is_decided() && self.lockout.is_open(self.clock.now_ms())
    }

    pub fn remaining_lock_ms(&self) -> u32 {
        self.lockout.remaining_ms(self.clock.now_ms())
    }

    pub fn select_move(&mut self, player_move: Move) -> Result<RoundResolution, SessionError> {
        let now = self.clock.now_ms();
        if !self.lockout.is_open(now) {
            return Err(SessionError::InputLocked {
                remaining_ms: self.lockout.remaining_ms(now),
            });
        }
        // 已决出胜负时不消耗随机数
        if self.tracker.is_decided() {
            return Err(MatchError::MatchAlreadyDecided {
                status: self.tracker.status(),
            }
            .into());
        }

        let computer_move = self.agent.choose_move();
        let outcome = resolve(player_move, computer_move);
        self.tracker.apply(outcome)?;

        self.round += 1;
        self.lockout.engage(now, self.config.move_delay_ms);

        let resolution = RoundResolution::new(
            self.round,
            player_move,
            computer_move,
            outcome,
            *self.tracker.state(),
        );
        self.last_message = Some(resolution.message.clone());
        self.event_log.extend(resolution.events());
        Ok(resolution)
    }

    pub fn announcement(&self) -> Announcement {
        if self.lockout.is_open(self.clock.now_ms()) {
            return self.settled_announcement();
        }
        match &self.last_message {
            Some(message) => Announcement::Round {
                message: message.clone(),
            },
            None => self.settled_announcement(),
        }
    }

    /// 当前锁定结束后页面应显示的内容。
    pub fn settled_announcement(&self) -> Announcement {
        match self.tracker.status() {
            MatchStatus::InProgress => Announcement::Play,
            MatchStatus::PlayerWon => Announcement::PlayerWonMatch,
            MatchStatus::ComputerWon => Announcement::ComputerWonMatch,
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.clear_round();
        self.event_log.push(GameEvent::MatchReset);
    }

    pub fn configure(&mut self, wins_required: u32) {
        let clamped = self.tracker.configure_clamped(wins_required);
        self.config.wins_required = self.tracker.config().wins_required;
        self.clear_round();
        self.event_log.push(GameEvent::Reconfigured {
            wins_required: self.config.wins_required,
            clamped,
        });
    }

    pub fn set_move_delay(&mut self, delay_ms: u32) {
        self.config.move_delay_ms = delay_ms;
    }

    fn clear_round(&mut self) {
        self.round = 0;
        self.last_message = None;
        self.lockout.release();
    }
}
