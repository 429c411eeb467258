//! 电脑对手模块（随机出拳）。

pub mod random;

pub use random::{choose_computer_move, ComputerAgent};
