use crate::core::{Board, Color};
use crate::game::record::SELFPLAY_RECORD_DIR;
use crate::game::Game;
use crate::player::ai::{AIConfig, AIStrength, MinimaxAI};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub red_strength: AIStrength,
    pub white_strength: AIStrength,
    /// Random plies played before the engines take over, so games differ.
    pub opening_plies: usize,
    pub seed: u64,
    pub save_records: bool,
    pub ai: AIConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            red_strength: AIStrength::Light,
            white_strength: AIStrength::Light,
            opening_plies: 4,
            seed: 0,
            save_records: false,
            ai: AIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub red_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(Color::Red) => self.red_wins += 1,
            Some(Color::White) => self.white_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }

    pub fn summary(&self) -> String {
        let pct = |n: usize| {
            if self.total_games == 0 {
                0.0
            } else {
                n as f64 / self.total_games as f64 * 100.0
            }
        };
        format!(
            "Games: {} | Red: {} ({:.1}%) | White: {} ({:.1}%) | Draws: {} ({:.1}%) | Avg moves: {:.1} | Avg time: {:.1}s",
            self.total_games,
            self.red_wins,
            pct(self.red_wins),
            self.white_wins,
            pct(self.white_wins),
            self.draws,
            pct(self.draws),
            self.avg_moves,
            self.avg_time_ms / 1000.0
        )
    }
}

/// Play the batch on the rayon pool. Results keep game order.
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let results = (1..=config.num_games)
        .into_par_iter()
        .map(|game_num| play_one(config, game_num))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut stats = SelfPlayStats::new();
    for result in results {
        stats.add_result(result);
    }
    tracing::info!(summary = %stats.summary(), "self-play finished");
    Ok(stats)
}

fn play_one(config: &SelfPlayConfig, game_num: usize) -> anyhow::Result<GameResult> {
    let start_time = Instant::now();
    let rules = config.ai.rules.rules();

    // Engines already run one game per thread
    let red = MinimaxAI::from_config(Color::Red, "AI-Red", config.red_strength, &config.ai)
        .with_parallel(false);
    let white = MinimaxAI::from_config(Color::White, "AI-White", config.white_strength, &config.ai)
        .with_parallel(false);

    let mut game = Game::new(Board::new()).with_rules(rules);
    game.max_moves = config.ai.rules.max_moves;

    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(game_num as u64));
    for _ in 0..config.opening_plies {
        if game.winner().is_some() {
            break;
        }
        let moves = game.legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        game.play_move(mv);
    }

    let outcome = game.run_silent(&red, &white)?;
    let elapsed = start_time.elapsed();
    tracing::info!(
        game = game_num,
        result = %outcome.describe(),
        elapsed_ms = elapsed.as_millis() as u64,
        "self-play game finished"
    );

    if config.save_records {
        game.to_record(outcome.winner)
            .save(SELFPLAY_RECORD_DIR, &format!("game_{:04}", game_num))?;
    }

    Ok(GameResult {
        winner: outcome.winner,
        moves: outcome.moves,
        time_ms: elapsed.as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(num_games: usize) -> SelfPlayConfig {
        let mut ai = AIConfig::default();
        ai.search.depth_light = 1;
        ai.rules.max_moves = 40;
        SelfPlayConfig {
            num_games,
            opening_plies: 2,
            seed: 42,
            ai,
            ..SelfPlayConfig::default()
        }
    }

    #[test]
    fn test_stats_add_up() {
        let stats = run_selfplay(&quick_config(4)).unwrap();
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.red_wins + stats.white_wins + stats.draws, 4);
        assert!(stats.games.iter().all(|g| g.moves <= 40));
    }

    #[test]
    fn test_seeded_batches_are_reproducible() {
        let a = run_selfplay(&quick_config(3)).unwrap();
        let b = run_selfplay(&quick_config(3)).unwrap();
        let key = |s: &SelfPlayStats| -> Vec<(Option<Color>, usize)> {
            s.games.iter().map(|g| (g.winner, g.moves)).collect()
        };
        assert_eq!(key(&a), key(&b));
    }

    #[test]
    fn test_empty_batch() {
        let stats = run_selfplay(&quick_config(0)).unwrap();
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.avg_moves, 0.0);
    }
}
