use super::config::{AIConfig, SearchConfig};
use super::eval::MaterialEvaluator;
use super::evaluator::Evaluator;
use crate::core::{Board, Color, Move};
use crate::logic::{apply_move, moves_for, successors, Rules};
use crate::player::PlayerController;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Everything the search passes down unchanged: the evaluator, the rule
/// switches and a node counter.
pub struct SearchContext<'a> {
    pub evaluator: &'a dyn Evaluator,
    pub rules: Rules,
    nodes: AtomicU64,
}

impl<'a> SearchContext<'a> {
    pub fn new(evaluator: &'a dyn Evaluator, rules: Rules) -> Self {
        Self {
            evaluator,
            rules,
            nodes: AtomicU64::new(0),
        }
    }

    /// Nodes visited since this context was created.
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }
}

/// White maximizes, Red minimizes.
pub fn side_to_move(maximizing: bool) -> Color {
    if maximizing {
        Color::White
    } else {
        Color::Red
    }
}

/// Score for a side that has nothing to play: it has lost.
fn no_move_score(maximizing: bool, evaluator: &dyn Evaluator) -> i32 {
    if maximizing {
        -evaluator.win_score()
    } else {
        evaluator.win_score()
    }
}

/// Running extremum where a later equal score replaces the earlier one.
pub(crate) fn pick_best<T>(
    scored: impl IntoIterator<Item = (i32, T)>,
    maximizing: bool,
) -> Option<(i32, T)> {
    let mut best: Option<(i32, T)> = None;
    for (score, item) in scored {
        let replace = match &best {
            None => true,
            Some((best_score, _)) if maximizing => score >= *best_score,
            Some((best_score, _)) => score <= *best_score,
        };
        if replace {
            best = Some((score, item));
        }
    }
    best
}

/// Fixed-depth minimax over copied boards.
///
/// Returns the extremal score and the successor board that reaches it. At
/// depth 0 or on a decided board the input board itself is returned with its
/// static evaluation. A side with no legal move at an inner node scores as a
/// loss and the input board is returned.
pub fn minimax(board: &Board, depth: u32, maximizing: bool, ctx: &SearchContext) -> (i32, Board) {
    ctx.nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 || board.winner().is_some() {
        return (ctx.evaluator.evaluate(board), board.clone());
    }

    let children = successors(board, side_to_move(maximizing), &ctx.rules);
    let scored = children.into_iter().map(|(_, child)| {
        let (score, _) = minimax(&child, depth - 1, !maximizing, ctx);
        (score, child)
    });

    match pick_best(scored, maximizing) {
        Some(best) => best,
        None => (no_move_score(maximizing, ctx.evaluator), board.clone()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AIStrength {
    Light,
    Strong,
}

pub struct MinimaxAI {
    color: Color,
    name: String,
    depth: u32,
    evaluator: MaterialEvaluator,
    rules: Rules,
    parallel: bool,
}

impl MinimaxAI {
    pub fn new(color: Color, name: &str, depth: u32) -> Self {
        Self {
            color,
            name: name.to_string(),
            depth,
            evaluator: MaterialEvaluator::default(),
            rules: Rules::default(),
            parallel: false,
        }
    }

    pub fn from_config(color: Color, name: &str, strength: AIStrength, config: &AIConfig) -> Self {
        let SearchConfig {
            depth_light,
            depth_strong,
            parallel_root,
        } = config.search;
        Self {
            color,
            name: name.to_string(),
            depth: match strength {
                AIStrength::Light => depth_light,
                AIStrength::Strong => depth_strong,
            },
            evaluator: MaterialEvaluator::new(config.evaluation),
            rules: config.rules.rules(),
            parallel: parallel_root,
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score every candidate move and pick one with the same tie-break as
    /// `minimax`. The root counts as one ply, so depth 0 behaves like 1.
    ///
    /// Candidates are this AI's own legal moves under its rules, kept only
    /// where `moves` also offers them, so the root and the inner nodes follow
    /// one rule set.
    pub fn best_move(&self, board: &Board, moves: &[Move]) -> Option<(i32, Move)> {
        let start = Instant::now();
        let candidates: Vec<Move> = moves_for(board, self.color, &self.rules)
            .into_iter()
            .filter(|mv| moves.contains(mv))
            .collect();
        let maximizing = self.color == Color::White;
        let ctx = SearchContext::new(&self.evaluator, self.rules);
        let child_depth = self.depth.saturating_sub(1);

        let score_move = |mv: &Move| {
            let child = apply_move(board, mv);
            let (score, _) = minimax(&child, child_depth, !maximizing, &ctx);
            (score, mv.clone())
        };

        // collect keeps the move order, so both paths break ties identically
        let scored: Vec<(i32, Move)> = if self.parallel {
            candidates.par_iter().map(score_move).collect()
        } else {
            candidates.iter().map(score_move).collect()
        };

        let best = pick_best(scored, maximizing);
        if let Some((score, mv)) = &best {
            tracing::debug!(
                ai = %self.name,
                color = %self.color,
                depth = self.depth,
                evaluator = self.evaluator.name(),
                %mv,
                score,
                nodes = ctx.nodes(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "minimax chose move"
            );
        }
        best
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        self.best_move(board, legal_moves).map(|(_, mv)| mv)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{setup_from_strings, Position};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_depth_zero_returns_input_board() {
        let eval = MaterialEvaluator::default();
        let ctx = SearchContext::new(&eval, Rules::default());
        let board = setup_from_strings(&[
            ".W......", "........", "...w....", "........", "........", "..r.....", "........",
            "........",
        ])
        .unwrap();

        for maximizing in [true, false] {
            let (score, returned) = minimax(&board, 0, maximizing, &ctx);
            assert_eq!(score, eval.evaluate(&board));
            assert_eq!(returned, board);
        }
        assert_eq!(ctx.nodes(), 2);
    }

    #[test]
    fn test_opening_depth_one_ties_resolve_to_last_move() {
        let eval = MaterialEvaluator::default();
        let ctx = SearchContext::new(&eval, Rules::default());
        let board = Board::new();

        let (score, best) = minimax(&board, 1, true, &ctx);
        assert_eq!(score, 0);

        let white_moves = moves_for(&board, Color::White, &Rules::default());
        let last = white_moves.last().unwrap();
        assert_eq!(*last, Move::new(pos(2, 7), pos(3, 6), vec![]));
        assert_eq!(best, apply_move(&board, last));
    }

    #[test]
    fn test_decided_board_is_terminal() {
        let eval = MaterialEvaluator::default();
        let ctx = SearchContext::new(&eval, Rules::default());
        let board = setup_from_strings(&[
            "........", "........", "........", "........", "........", "..r.....", "........",
            "........",
        ])
        .unwrap();

        let (score, returned) = minimax(&board, 5, true, &ctx);
        assert_eq!(score, -eval.win_score());
        assert_eq!(returned, board);
        assert_eq!(ctx.nodes(), 1);
    }

    #[test]
    fn test_side_without_moves_loses() {
        let eval = MaterialEvaluator::default();
        let ctx = SearchContext::new(&eval, Rules::default());
        // Red is boxed in, White is to play second.
        let board = setup_from_strings(&[
            "...w....", "w.w.....", ".r......", "........", "........", "........", "........",
            "........",
        ])
        .unwrap();

        let (score, returned) = minimax(&board, 3, false, &ctx);
        assert_eq!(score, eval.win_score());
        assert_eq!(returned, board);
    }

    #[test]
    fn test_takes_free_piece() {
        let board = setup_from_strings(&[
            "........", "........", "........", "..w.....", "...r....", "........", "........",
            "......r.",
        ])
        .unwrap();
        let moves = moves_for(&board, Color::White, &Rules::default());
        let ai = MinimaxAI::new(Color::White, "AI", 1);
        let (score, mv) = ai.best_move(&board, &moves).unwrap();
        assert_eq!(mv, Move::new(pos(3, 2), pos(5, 4), vec![pos(4, 3)]));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_avoids_hanging_piece() {
        // A white man can step next to a red man and be jumped, or step away.
        let board = setup_from_strings(&[
            "........", "........", "...w....", "........", ".....r..", "........", ".r......",
            "........",
        ])
        .unwrap();
        let moves = moves_for(&board, Color::White, &Rules::default());
        let ai = MinimaxAI::new(Color::White, "AI", 2);
        let (_, mv) = ai.best_move(&board, &moves).unwrap();
        assert_eq!(mv.to, pos(3, 2));
    }

    #[test]
    fn test_root_agrees_with_minimax_and_parallel() {
        let board = Board::new();
        let eval = MaterialEvaluator::default();
        let ctx = SearchContext::new(&eval, Rules::default());
        let (score, best_board) = minimax(&board, 3, false, &ctx);

        let moves = moves_for(&board, Color::Red, &Rules::default());
        let serial = MinimaxAI::new(Color::Red, "serial", 3);
        let parallel = MinimaxAI::new(Color::Red, "parallel", 3).with_parallel(true);

        let (s1, m1) = serial.best_move(&board, &moves).unwrap();
        let (s2, m2) = parallel.best_move(&board, &moves).unwrap();
        assert_eq!((s1, &m1), (s2, &m2));
        assert_eq!(s1, score);
        assert_eq!(apply_move(&board, &m1), best_board);
    }

    #[test]
    fn test_no_moves_no_choice() {
        let ai = MinimaxAI::new(Color::Red, "AI", 2);
        assert!(ai.choose_move(&Board::new(), &[]).is_none());
    }

    #[test]
    fn test_root_follows_own_rules() {
        // Taking on (4, 3) walks into a recapture from (6, 5) that ends the
        // game; stepping to (4, 1) is safe. Only forced capture makes the AI take.
        let board = setup_from_strings(&[
            "........", "........", "........", "..w.....", "...r....", "........", ".....r..",
            "......r.",
        ])
        .unwrap();
        let offered = moves_for(&board, Color::White, &Rules::default());
        let capture = Move::new(pos(3, 2), pos(5, 4), vec![pos(4, 3)]);
        assert!(offered.contains(&capture));

        let free = MinimaxAI::new(Color::White, "free", 2);
        let (score, mv) = free.best_move(&board, &offered).unwrap();
        assert_eq!(mv, Move::new(pos(3, 2), pos(4, 1), vec![]));
        assert_eq!(score, -200);

        let forced = MinimaxAI::new(Color::White, "forced", 2).with_rules(Rules {
            forced_capture: true,
        });
        let (score, mv) = forced.best_move(&board, &offered).unwrap();
        assert_eq!(mv, capture);
        assert_eq!(score, -free.evaluator.win_score());
    }
}
