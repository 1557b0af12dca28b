//! Core types module - shared data structures and constants
//!
//! This module defines the value types shared by the board state machine and
//! its render collaborators. Everything here is plain data with no required
//! dependencies (the optional `serde` feature only adds derives).
//!
//! # Stone handles
//!
//! Stones live in a growing table. A [`StoneId`] is the stone's slot in that
//! table; slot 0 holds a placeholder, so a handle is never zero and a grid
//! cell of `Option<StoneId>` costs exactly one `u32` (raw value 0 = empty).
//!
//! # Animation tuning
//!
//! All speeds are per tick:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROTATING_SPEED` | 1.5 | Standard spin, degrees |
//! | `ROTATING_SPEED_FAST` | 6.0 | Fast spin, degrees |
//! | `FALLING_SPEED` | 6.0 | `fall_to` drop speed, px |
//! | `SWAPPING_SPEED` | 4.0 | Swap travel speed, px |
//! | `CELL_SIZE` | 64.0 | Distance between cell centers, px |
//! | `MODEL_SCALE` | 0.3 | Uniform scale applied to stone models |
//!
//! # Examples
//!
//! ```
//! use stone_grid_types::{RotateMode, StoneError, StoneId};
//!
//! let mode = RotateMode::try_from(2).unwrap();
//! assert_eq!(mode, RotateMode::RotateFast);
//! assert_eq!(RotateMode::try_from(9), Err(StoneError::ArgumentError));
//!
//! let id = StoneId::from_raw(3).unwrap();
//! assert_eq!(id.raw(), 3);
//! assert!(StoneId::from_raw(0).is_none());
//! ```

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard spin speed (degrees per tick).
pub const ROTATING_SPEED: f32 = 1.5;

/// Fast spin speed (degrees per tick).
pub const ROTATING_SPEED_FAST: f32 = 6.0;

/// Fall speed used by `fall_to` (pixels per tick).
pub const FALLING_SPEED: f32 = 6.0;

/// Swap travel speed (pixels per tick).
pub const SWAPPING_SPEED: f32 = 4.0;

/// Distance between two adjacent cell centers in pixels.
pub const CELL_SIZE: f32 = 64.0;

/// Uniform model scale used by the draw contract.
pub const MODEL_SCALE: f32 = 0.3;

/// Frame interval of the interactive runner (~60 updates per second).
pub const TICK_MS: u32 = 16;

/// Visual type tag of a stone (selects its model / glyph).
pub type StoneKind = u32;

/// Handle of a stone in the stone table.
///
/// Handles are table slots and are never reused while a board stays
/// initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StoneId(NonZeroU32);

impl StoneId {
    /// Build a handle from a raw table slot; slot 0 is the empty marker.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn raw(self) -> u32 {
        self.0.get()
    }

    /// Table slot of this stone.
    pub fn slot(self) -> usize {
        self.0.get() as usize
    }
}

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw value of a grid cell: 0 for empty, the handle otherwise.
pub fn cell_raw(cell: Option<StoneId>) -> u32 {
    cell.map_or(0, StoneId::raw)
}

/// How a stone spins in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotateMode {
    Static,
    Rotate,
    RotateFast,
    RotateInverse,
    RotateFastInverse,
}

impl RotateMode {
    /// Spin speed in degrees per tick for the given standard/fast rates.
    pub fn speed(self, standard: f32, fast: f32) -> f32 {
        match self {
            RotateMode::Static => 0.0,
            RotateMode::Rotate => standard,
            RotateMode::RotateFast => fast,
            RotateMode::RotateInverse => -standard,
            RotateMode::RotateFastInverse => -fast,
        }
    }
}

impl TryFrom<i32> for RotateMode {
    type Error = StoneError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RotateMode::Static),
            1 => Ok(RotateMode::Rotate),
            2 => Ok(RotateMode::RotateFast),
            3 => Ok(RotateMode::RotateInverse),
            4 => Ok(RotateMode::RotateFastInverse),
            _ => Err(StoneError::ArgumentError),
        }
    }
}

/// Failure kinds of board operations.
///
/// Every operation validates fully before mutating, so an `Err` always means
/// the board is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StoneError {
    NotInitialized,
    AlreadyInitialized,
    ArgumentError,
    Occupied,
    Empty,
}

impl StoneError {
    pub fn code(self) -> &'static str {
        match self {
            StoneError::NotInitialized => "not_initialized",
            StoneError::AlreadyInitialized => "already_initialized",
            StoneError::ArgumentError => "argument_error",
            StoneError::Occupied => "occupied",
            StoneError::Empty => "empty",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            StoneError::NotInitialized => "board has not been initialized",
            StoneError::AlreadyInitialized => "board is already initialized",
            StoneError::ArgumentError => "coordinate out of bounds or invalid argument",
            StoneError::Occupied => "target cell is occupied",
            StoneError::Empty => "cell holds no stone",
        }
    }
}

impl fmt::Display for StoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for StoneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_mode_codes_follow_variant_order_and_reject_unknown() {
        let modes = [
            RotateMode::Static,
            RotateMode::Rotate,
            RotateMode::RotateFast,
            RotateMode::RotateInverse,
            RotateMode::RotateFastInverse,
        ];
        for (code, mode) in modes.into_iter().enumerate() {
            assert_eq!(RotateMode::try_from(code as i32), Ok(mode));
        }
        assert_eq!(RotateMode::try_from(-1), Err(StoneError::ArgumentError));
        assert_eq!(RotateMode::try_from(5), Err(StoneError::ArgumentError));
    }

    #[test]
    fn rotate_mode_speeds() {
        assert_eq!(RotateMode::Static.speed(1.5, 6.0), 0.0);
        assert_eq!(RotateMode::Rotate.speed(1.5, 6.0), 1.5);
        assert_eq!(RotateMode::RotateFast.speed(1.5, 6.0), 6.0);
        assert_eq!(RotateMode::RotateInverse.speed(1.5, 6.0), -1.5);
        assert_eq!(RotateMode::RotateFastInverse.speed(1.5, 6.0), -6.0);
    }

    #[test]
    fn stone_id_is_niche_optimized() {
        assert_eq!(
            std::mem::size_of::<Option<StoneId>>(),
            std::mem::size_of::<u32>()
        );
        assert_eq!(cell_raw(None), 0);
        assert_eq!(cell_raw(StoneId::from_raw(7)), 7);
    }

    #[test]
    fn error_display_includes_code() {
        let text = StoneError::Occupied.to_string();
        assert!(text.contains("occupied"));
    }
}
