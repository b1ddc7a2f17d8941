use crate::core::{Board, Color, Move};
use crate::logic::{commit_move, moves_for, Rules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RECORD_DIR: &str = "records";
pub const SELFPLAY_RECORD_DIR: &str = "records/selfplay";

/// 棋譜: a finished game, Red moving first from `initial`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub initial: Board,
    pub rules: Rules,
    pub moves: Vec<Move>,
    pub winner: Option<Color>,
    pub finished_at: String,
}

impl GameRecord {
    pub fn new(initial: Board, rules: Rules, moves: Vec<Move>, winner: Option<Color>) -> Self {
        Self {
            initial,
            rules,
            moves,
            winner,
            finished_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Write the record as JSON into `dir` and return the file path.
    pub fn save(&self, dir: impl AsRef<Path>, label: &str) -> anyhow::Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let filename = dir.join(format!(
            "{}_{}.json",
            label,
            chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
        ));
        let file = std::fs::File::create(&filename)?;
        serde_json::to_writer_pretty(file, self)?;
        tracing::info!(path = %filename.display(), moves = self.moves.len(), "saved game record");
        Ok(filename)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let record: GameRecord = serde_json::from_reader(file)?;
        Ok(record)
    }

    /// Every position of the game, starting with `initial`. Each stored move
    /// is checked against the move generator on the way.
    pub fn replay(&self) -> anyhow::Result<Vec<Board>> {
        let mut board = self.initial.clone();
        let mut turn = Color::Red;
        let mut boards = vec![board.clone()];

        for (ply, mv) in self.moves.iter().enumerate() {
            if !moves_for(&board, turn, &self.rules).contains(mv) {
                anyhow::bail!("illegal move at ply {}: {} ({} to move)", ply + 1, mv, turn);
            }
            commit_move(&mut board, mv);
            boards.push(board.clone());
            turn = turn.opponent();
        }
        Ok(boards)
    }
}

/// JSON records in `dir`, oldest first. A missing directory has no records.
pub fn list_records(dir: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<(std::time::SystemTime, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .filter_map(|path| {
            let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((modified, path))
        })
        .collect();
    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("checkers_ai_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir("record");
        let p = |r, c| Position::new(r, c).unwrap();
        let record = GameRecord::new(
            Board::new(),
            Rules::default(),
            vec![Move::new(p(5, 0), p(4, 1), vec![])],
            None,
        );
        let path = record.save(&dir, "test").unwrap();
        assert_eq!(GameRecord::load(&path).unwrap(), record);
        assert_eq!(list_records(&dir).unwrap(), vec![path]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dir_has_no_records() {
        let dir = temp_dir("missing");
        assert!(list_records(&dir).unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_corrupt_initial_board() {
        let dir = temp_dir("corrupt");
        let path = GameRecord::new(Board::new(), Rules::default(), Vec::new(), None)
            .save(&dir, "corrupt")
            .unwrap();

        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        // a white man on the light square (3, 3)
        json["initial"][3] = serde_json::json!("...w....");
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(GameRecord::load(&path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
