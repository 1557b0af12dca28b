//! Board configuration: animation tuning, geometry and diagnostics.

use crate::types::{
    CELL_SIZE, FALLING_SPEED, MODEL_SCALE, ROTATING_SPEED, ROTATING_SPEED_FAST, SWAPPING_SPEED,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Seed for the default [`SimpleRng`](crate::rng::SimpleRng).
    pub seed: u32,
    /// Distance between adjacent cell centers, in pixels.
    pub cell_size: f32,
    pub rotating_speed: f32,
    pub rotating_speed_fast: f32,
    pub falling_speed: f32,
    pub swapping_speed: f32,
    /// Uniform scale handed to the render target.
    pub model_scale: f32,
    /// Emit `[StoneBoard]` trace lines on stderr.
    pub debug: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            cell_size: CELL_SIZE,
            rotating_speed: ROTATING_SPEED,
            rotating_speed_fast: ROTATING_SPEED_FAST,
            falling_speed: FALLING_SPEED,
            swapping_speed: SWAPPING_SPEED,
            model_scale: MODEL_SCALE,
            debug: false,
        }
    }
}

impl BoardConfig {
    /// Create from environment variables, falling back to defaults.
    ///
    /// - `STONE_GRID_SEED`
    /// - `STONE_GRID_CELL_SIZE`
    /// - `STONE_GRID_MODEL_SCALE`
    /// - `STONE_GRID_DEBUG` (`1` or `true`)
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let seed = env::var("STONE_GRID_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let cell_size = env::var("STONE_GRID_CELL_SIZE")
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.cell_size);

        let model_scale = env::var("STONE_GRID_MODEL_SCALE")
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.model_scale);

        let debug = env::var("STONE_GRID_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            seed,
            cell_size,
            model_scale,
            debug,
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuning_constants() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.cell_size, CELL_SIZE);
        assert_eq!(cfg.rotating_speed, ROTATING_SPEED);
        assert_eq!(cfg.falling_speed, FALLING_SPEED);
        assert_eq!(cfg.model_scale, MODEL_SCALE);
        assert!(!cfg.debug);
    }

    #[test]
    fn from_env_rejects_non_finite_sizes() {
        std::env::set_var("STONE_GRID_CELL_SIZE", "inf");
        std::env::set_var("STONE_GRID_MODEL_SCALE", "NaN");
        let cfg = BoardConfig::from_env();
        assert_eq!(cfg.cell_size, CELL_SIZE);
        assert_eq!(cfg.model_scale, MODEL_SCALE);

        std::env::set_var("STONE_GRID_CELL_SIZE", "32");
        std::env::set_var("STONE_GRID_MODEL_SCALE", "-1");
        let cfg = BoardConfig::from_env();
        assert_eq!(cfg.cell_size, 32.0);
        assert_eq!(cfg.model_scale, MODEL_SCALE);

        std::env::remove_var("STONE_GRID_CELL_SIZE");
        std::env::remove_var("STONE_GRID_MODEL_SCALE");
    }

    #[test]
    fn builder_helpers_override_fields() {
        let cfg = BoardConfig::default().with_seed(99).with_debug(true);
        assert_eq!(cfg.seed, 99);
        assert!(cfg.debug);
    }
}
