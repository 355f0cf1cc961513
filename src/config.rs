//! Engine configuration.
//!
//! The search only ever sees a depth and a time budget. Which depth a
//! difficulty tier maps to is policy, kept here and optionally loaded from a
//! TOML file:
//!
//! ```toml
//! move_time_ms = 1000
//! default_difficulty = "amateur"
//! fallback_depth = 2
//!
//! [[difficulty]]
//! name = "beginner"
//! depth = 1
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Depth, MAX_DEPTH};

/// Wall-clock budget for a single `select_move` call.
pub const DEFAULT_MOVE_TIME_MS: u64 = 1000;

/// Depth used for a tier name the table does not know.
pub const DEFAULT_FALLBACK_DEPTH: i32 = 2;

/// A named difficulty level and the search depth it plays at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub name: String,
    pub depth: i32,
}

impl DifficultyTier {
    fn new(name: &str, depth: i32) -> Self {
        Self {
            name: name.to_string(),
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time budget per search in milliseconds
    pub move_time_ms: u64,
    /// Tier used until the host selects another
    pub default_difficulty: String,
    /// Depth for unknown tier names
    pub fallback_depth: i32,
    /// Difficulty table, in display order
    #[serde(rename = "difficulty")]
    pub difficulties: Vec<DifficultyTier>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_time_ms: DEFAULT_MOVE_TIME_MS,
            default_difficulty: "amateur".to_string(),
            fallback_depth: DEFAULT_FALLBACK_DEPTH,
            difficulties: vec![
                DifficultyTier::new("beginner", 1),
                DifficultyTier::new("amateur", 2),
                DifficultyTier::new("semiPro", 2),
                DifficultyTier::new("pro", 2),
                DifficultyTier::new("advanced", 3),
                DifficultyTier::new("legendary", 3),
            ],
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Reject depths the search cannot honour and a zero time budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_time_ms == 0 {
            return Err(ConfigError::ZeroMoveTime);
        }
        check_depth("<fallback>", self.fallback_depth)?;
        for tier in &self.difficulties {
            check_depth(&tier.name, tier.depth)?;
        }
        if !self.has_difficulty(&self.default_difficulty) {
            return Err(ConfigError::UnknownDifficulty(
                self.default_difficulty.clone(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    /// Depth for a tier name. Unknown names get `fallback_depth`.
    pub fn depth_for(&self, tier: &str) -> Depth {
        let depth = self
            .difficulties
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(tier))
            .map_or(self.fallback_depth, |t| t.depth);
        Depth::new(depth)
    }

    pub fn has_difficulty(&self, tier: &str) -> bool {
        self.difficulties
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(tier))
    }

    /// Canonical spelling of a tier name, if known.
    pub fn difficulty_name(&self, tier: &str) -> Option<&str> {
        self.difficulties
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(tier))
            .map(|t| t.name.as_str())
    }

    pub fn difficulty_names(&self) -> impl Iterator<Item = &str> {
        self.difficulties.iter().map(|t| t.name.as_str())
    }
}

fn check_depth(tier: &str, depth: i32) -> Result<(), ConfigError> {
    if (1..=MAX_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDepth {
            tier: tier.to_string(),
            depth,
            max: MAX_DEPTH,
        })
    }
}
