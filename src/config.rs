use crate::cascade::CascadeSimulator;
use crate::engine::{Color, Grid};
use crate::error::ConfigError;
use crate::heuristics::SelectionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default board height and width.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Which `SelectionPolicy` a configuration selects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    MaxTotal,
    #[default]
    MaxLongestRun,
    ColorPriority,
}

/// Everything the engine can be configured with.
///
/// ```
/// use match3_solver::config::{EngineConfig, PolicyKind};
/// use match3_solver::engine::Color;
///
/// let config = EngineConfig::from_json_str(
///     r#"{ "rows": 6, "policy": "color_priority", "color_priority": ["blue", "red_special"] }"#,
/// ).unwrap();
/// assert_eq!(config.rows, 6);
/// assert_eq!(config.cols, 8);
/// assert_eq!(config.policy, PolicyKind::ColorPriority);
/// assert_eq!(config.color_priority, vec![Color::Blue, Color::RedSpecial]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Ordered colors for `PolicyKind::ColorPriority`. There is no default order.
    pub color_priority: Vec<Color>,
    /// Cascade pass cap. `None` uses `rows * cols * CASCADE_PASS_FACTOR`.
    pub max_cascade_passes: Option<usize>,
    pub policy: PolicyKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            color_priority: Vec::new(),
            max_cascade_passes: None,
            policy: PolicyKind::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.max_cascade_passes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_cascade_passes must be at least 1".to_string(),
            ));
        }
        if self.policy == PolicyKind::ColorPriority && self.color_priority.is_empty() {
            return Err(ConfigError::Invalid(
                "color_priority policy needs a non-empty color_priority list".to_string(),
            ));
        }
        Ok(())
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        match self.policy {
            PolicyKind::MaxTotal => SelectionPolicy::MaxTotal,
            PolicyKind::MaxLongestRun => SelectionPolicy::MaxLongestRun,
            PolicyKind::ColorPriority => SelectionPolicy::ColorPriority(self.color_priority.clone()),
        }
    }

    pub fn simulator(&self) -> CascadeSimulator {
        match self.max_cascade_passes {
            Some(cap) => CascadeSimulator::with_max_passes(cap),
            None => CascadeSimulator::new(),
        }
    }

    /// Cascade pass cap that applies to `grid` under this configuration.
    pub fn cascade_cap(&self, grid: &Grid) -> usize {
        self.simulator().pass_cap(grid)
    }

    /// True if `grid` has the configured dimensions.
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.rows() == self.rows && grid.cols() == self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selection_policy(), SelectionPolicy::MaxLongestRun);
        assert!(config.fits(&Grid::new_empty(8, 8)));
        assert!(!config.fits(&Grid::new_empty(8, 7)));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_color_priority_requires_colors() {
        let err = EngineConfig::from_json_str(r#"{ "policy": "color_priority" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_dimensions_and_unknown_fields() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "rows": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "interval_ms": 100 }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "color_priority": ["green"] }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_cascade_cap_reaches_simulator() {
        let config = EngineConfig::from_json_str(r#"{ "max_cascade_passes": 3 }"#).unwrap();
        assert_eq!(config.simulator(), CascadeSimulator::with_max_passes(3));
        assert_eq!(EngineConfig::default().simulator(), CascadeSimulator::new());

        let grid = Grid::new_empty(3, 5);
        assert_eq!(config.cascade_cap(&grid), 3);
        assert_eq!(EngineConfig::default().cascade_cap(&grid), 3 * 5 * 4);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = EngineConfig::load("/nonexistent/match3.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
