use crate::game::DEFAULT_MAX_MOVES;
use crate::logic::Rules;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "ai_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub man_value: i32,
    pub king_bonus: i32,
    pub win_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub depth_light: u32,
    pub depth_strong: u32,
    /// Search root moves on the rayon pool.
    pub parallel_root: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub forced_capture: bool,
    /// Game is drawn after this many plies.
    pub max_moves: usize,
}

impl RulesConfig {
    pub fn rules(&self) -> Rules {
        Rules {
            forced_capture: self.forced_capture,
        }
    }
}

impl AIConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load(DEFAULT_CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "using default AI config");
                Self::default()
            }
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig {
                man_value: 100,
                king_bonus: 50,
                win_score: 100_000,
            },
            search: SearchConfig {
                depth_light: 2,
                depth_strong: 4,
                parallel_root: true,
            },
            rules: RulesConfig {
                forced_capture: false,
                max_moves: DEFAULT_MAX_MOVES,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("checkers_ai_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ai_config.json");

        let mut config = AIConfig::default();
        config.rules.forced_capture = true;
        config.search.depth_strong = 6;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AIConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.rules.rules().forced_capture);

        assert!(AIConfig::load(dir.join("missing.json")).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
