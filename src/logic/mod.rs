use crate::core::{Board, Color, Move, Position};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Entry};

/// Destination cell -> pieces jumped on the way there, in jump order.
/// Simple steps map to an empty list.
pub type MoveMap = BTreeMap<Position, Vec<Position>>;

const COLUMN_STEPS: [isize; 2] = [-1, 1];

/// Rule switches layered on top of the move generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// When a capture exists, simple steps are not offered.
    pub forced_capture: bool,
}

/// 合法手生成 (1駒分)
///
/// Every destination the piece on `from` can reach this turn. Men walk their
/// colour's forward diagonals, kings all four. A simple step is only ever one
/// cell; captures chain onward from each landing cell along the same vertical
/// direction, and every landing along the chain is its own destination.
/// Jumped pieces stay on the board while the chain is explored.
pub fn legal_moves(board: &Board, from: Position) -> MoveMap {
    let mut moves = MoveMap::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    for &dr in piece.directions() {
        for dc in COLUMN_STEPS {
            let Some(next) = from.offset(dr, dc) else {
                continue;
            };
            match board.piece_at(next) {
                None => record(&mut moves, next, Vec::new()),
                Some(other) if other.color != piece.color => {
                    jump(board, piece.color, next, dr, dc, Vec::new(), &mut moves);
                }
                Some(_) => {}
            }
        }
    }
    moves
}

/// Try to jump `over` in direction (dr, dc) and keep chaining from the
/// landing cell. `captured` is this branch's own copy of the chain so far.
fn jump(
    board: &Board,
    color: Color,
    over: Position,
    dr: isize,
    dc: isize,
    captured: Vec<Position>,
    moves: &mut MoveMap,
) {
    if captured.contains(&over) {
        return;
    }
    let Some(landing) = over.offset(dr, dc) else {
        return;
    };
    if board.piece_at(landing).is_some() {
        return;
    }

    let mut chain = captured;
    chain.push(over);
    record(moves, landing, chain.clone());

    for next_dc in COLUMN_STEPS {
        let Some(next) = landing.offset(dr, next_dc) else {
            continue;
        };
        if let Some(other) = board.piece_at(next) {
            if other.color != color {
                jump(board, color, next, dr, next_dc, chain.clone(), moves);
            }
        }
    }
}

/// Keep the longer chain when two routes end on the same cell; on a tie the
/// route found first stays.
fn record(moves: &mut MoveMap, to: Position, captured: Vec<Position>) {
    match moves.entry(to) {
        Entry::Vacant(e) => {
            e.insert(captured);
        }
        Entry::Occupied(mut e) => {
            if captured.len() > e.get().len() {
                e.insert(captured);
            }
        }
    }
}

/// 手番側の全ての手
///
/// Pieces are visited row-major and destinations in ascending order, so the
/// list is stable for a given board.
pub fn moves_for(board: &Board, color: Color, rules: &Rules) -> Vec<Move> {
    let mut moves: Vec<Move> = board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            legal_moves(board, from)
                .into_iter()
                .map(move |(to, captured)| Move::new(from, to, captured))
        })
        .collect();

    if rules.forced_capture && moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }
    moves
}

/// Apply a move in place: relocate the piece, then clear everything it
/// jumped. Returns true when the piece was crowned.
pub fn commit_move(board: &mut Board, mv: &Move) -> bool {
    let promoted = board.move_piece(mv.from, mv.to);
    if mv.is_capture() {
        board.remove(&mv.captured);
    }
    promoted
}

/// 移動適用
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();
    commit_move(&mut next, mv);
    next
}

/// One independent board per legal move, in `moves_for` order.
pub fn successors(board: &Board, color: Color, rules: &Rules) -> Vec<(Move, Board)> {
    moves_for(board, color, rules)
        .into_iter()
        .map(|mv| {
            let next = apply_move(board, &mv);
            (mv, next)
        })
        .collect()
}

/// Game outcome with `to_move` about to play: a side with no pieces left
/// loses, and so does a side to move that has no legal move.
pub fn game_result(board: &Board, to_move: Color, rules: &Rules) -> Option<Color> {
    if let Some(winner) = board.winner() {
        return Some(winner);
    }
    if moves_for(board, to_move, rules).is_empty() {
        return Some(to_move.opponent());
    }
    None
}
