pub mod ai;
pub mod game;
pub mod session;
pub mod utils;

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{choose_computer_move, ComputerAgent};
pub use game::{
    resolve, round_message, GameEvent, IntegrityError, MatchConfig, MatchError, MatchState,
    MatchStatus, MatchTracker, Move, Outcome, ParseMoveError, RoundResolution,
};
pub use session::{
    Announcement, Clock, GameSession, InputLockout, ManualClock, SessionConfig, SessionError,
    WasmClock,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}

fn to_js_error<E: Serialize>(error: &E) -> JsValue {
    to_value(error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_move(value: &str) -> Result<Move, JsValue> {
    Move::from_str(value).map_err(|error| to_js_error(&error))
}

/// JS 传入的负数按 0 处理，交给阈值校验或截断。
fn wins_from_js(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// 反序列化后重新校验，防止前端传入不一致的比分。
fn tracker_from_js(tracker: JsValue) -> Result<MatchTracker, JsValue> {
    let tracker: MatchTracker = from_value(tracker).map_err(JsValue::from)?;
    MatchTracker::from_parts(*tracker.config(), *tracker.state()).map_err(|error| to_js_error(&error))
}

#[derive(Serialize)]
struct ApplyResponse {
    tracker: MatchTracker,
    status: MatchStatus,
}

#[wasm_bindgen]
pub struct RpsEngine {
    session: GameSession<WasmClock>,
}

#[wasm_bindgen]
impl RpsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RpsEngine, JsValue> {
        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json).map_err(serde_to_js_error)?,
            None => SessionConfig::default(),
        };
        utils::log(&format!(
            "rps engine ready: wins_required={}, move_delay_ms={}",
            config.wins_required, config.move_delay_ms
        ));
        Ok(RpsEngine {
            session: GameSession::new(config, WasmClock),
        })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state()).map_err(serde_to_js_error)
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.config()).map_err(serde_to_js_error)
    }

    pub fn events_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.event_log()).map_err(serde_to_js_error)
    }

    pub fn select_move(&mut self, player_move: &str) -> Result<String, JsValue> {
        let player_move = parse_move(player_move)?;
        match self.session.select_move(player_move) {
            Ok(resolution) => serde_json::to_string(&resolution).map_err(serde_to_js_error),
            Err(error) => {
                utils::warn(&format!("move {player_move} rejected: {error:?}"));
                Err(to_js_error(&error))
            }
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.session.input_enabled()
    }

    pub fn remaining_lock_ms(&self) -> u32 {
        self.session.remaining_lock_ms()
    }

    pub fn announcement(&self) -> String {
        self.session.announcement().message().to_string()
    }

    /// 等待当前锁定结束后 resolve（无返回值），横幅由页面随后调用 `announcement()` 读取。
    pub fn wait_for_input(&self) -> Promise {
        let delay = self.session.remaining_lock_ms();

        future_to_promise(async move {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn configure(&mut self, wins_required: i32) {
        self.session.configure(wins_from_js(wins_required));
        utils::log(&format!(
            "wins required set to {}",
            self.session.config().wins_required
        ));
    }

    pub fn set_move_delay(&mut self, delay_ms: u32) {
        self.session.set_move_delay(delay_ms);
    }
}

/// 判定一回合，参数为 "rock" / "paper" / "scissors"。
#[wasm_bindgen(js_name = "resolveRound")]
pub fn resolve_round(player: &str, computer: &str) -> Result<JsValue, JsValue> {
    let outcome = resolve(parse_move(player)?, parse_move(computer)?);
    to_value(&outcome).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "chooseComputerMove")]
pub fn choose_computer_move_js() -> String {
    choose_computer_move().name().to_string()
}

/// 创建新比赛，阈值小于 1 时截断为 1。
#[wasm_bindgen(js_name = "createMatch")]
pub fn create_match(wins_required: i32) -> Result<JsValue, JsValue> {
    let tracker = MatchTracker::new(MatchConfig::clamped(wins_from_js(wins_required)));
    to_value(&tracker).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "configureMatch")]
pub fn configure_match(tracker: JsValue, wins_required: i32) -> Result<JsValue, JsValue> {
    let mut tracker = tracker_from_js(tracker)?;
    tracker
        .configure(wins_from_js(wins_required))
        .map_err(|error| to_js_error(&error))?;
    to_value(&tracker).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyOutcome")]
pub fn apply_outcome(tracker: JsValue, outcome: JsValue) -> Result<JsValue, JsValue> {
    let mut tracker = tracker_from_js(tracker)?;
    let outcome: Outcome = from_value(outcome).map_err(JsValue::from)?;
    let status = tracker.apply(outcome).map_err(|error| to_js_error(&error))?;
    to_value(&ApplyResponse { tracker, status }).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "resetMatch")]
pub fn reset_match(tracker: JsValue) -> Result<JsValue, JsValue> {
    let mut tracker = tracker_from_js(tracker)?;
    tracker.reset();
    to_value(&tracker).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateMatch")]
pub fn validate_match(tracker: JsValue) -> Result<(), JsValue> {
    tracker_from_js(tracker).map(|_| ())
}
