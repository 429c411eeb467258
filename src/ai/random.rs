use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::game::Move;

/// 电脑对手：每次独立、均匀地随机出拳，不参考历史。
pub struct ComputerAgent {
    rng: SmallRng,
}

impl ComputerAgent {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self) -> Move {
        draw_move(&mut self.rng)
    }
}

impl Default for ComputerAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// 不持有状态的便捷入口，复用线程内的随机数生成器。
pub fn choose_computer_move() -> Move {
    draw_move(&mut rand::thread_rng())
}

fn draw_move<R: Rng>(rng: &mut R) -> Move {
    Move::ALL[rng.gen_range(0..Move::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(mut next: impl FnMut() -> Move, draws: usize) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[next().index()] += 1;
        }
        counts
    }

    #[test]
    fn seeded_agent_is_roughly_uniform() {
        let mut agent = ComputerAgent::with_seed(7);
        let counts = tally(|| agent.choose_move(), 3000);
        for (mv, count) in Move::ALL.iter().zip(counts) {
            assert!(
                (800..=1200).contains(&count),
                "{mv} drawn {count} times out of 3000"
            );
        }
    }

    #[test]
    fn entropy_moves_cover_all_choices() {
        let counts = tally(choose_computer_move, 1200);
        assert!(
            counts.iter().all(|&count| count > 250),
            "every move should appear, got {counts:?}"
        );
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut first = ComputerAgent::with_seed(42);
        let mut second = ComputerAgent::with_seed(42);
        let a: Vec<Move> = (0..20).map(|_| first.choose_move()).collect();
        let b: Vec<Move> = (0..20).map(|_| second.choose_move()).collect();
        assert_eq!(a, b);
    }
}
