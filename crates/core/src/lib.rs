//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the stone board state machine. It has **no dependencies**
//! on rendering, windowing or I/O, which makes it:
//!
//! - **Deterministic**: fall-speed jitter comes from an injected [`RandomSource`]
//! - **Testable**: every operation returns a typed [`StoneError`] and never
//!   partially mutates
//! - **Portable**: drawing goes through the [`AssetCatalog`] / [`RenderTarget`]
//!   traits, so any backend can present the board
//!
//! # Module Structure
//!
//! - [`piece`]: a single animated stone (spin, fall and swap motion)
//! - [`grid`]: committed and presented grids plus the stone table
//! - [`animation`]: the FIFO queue of pending visual transitions
//! - [`board`]: the controller tying the pieces together
//! - [`geometry`]: cell ⇄ screen coordinate mapping
//! - [`render`]: the draw contract
//! - [`rng`]: injectable random source
//! - [`snapshot`]: plain-data board copies
//!
//! # Two grids
//!
//! The *committed* grid changes the moment a call is accepted. The *presented*
//! grid is what should be on screen: it only catches up as queued animations
//! finish, one queue head per [`StoneBoard::update`] tick.
//!
//! # Example
//!
//! ```
//! use stone_grid_core::{BoardConfig, StoneBoard};
//!
//! let mut board = StoneBoard::new(BoardConfig::default());
//! board.init(3, 3).unwrap();
//!
//! board.generate(1, 1, 0, None).unwrap();
//! board.remove(1, 1).unwrap();
//! assert!(board.committed_at(1, 1).is_none());
//! assert!(board.presented_at(1, 1).is_some());
//!
//! for _ in 0..100 {
//!     board.update();
//! }
//! assert!(board.presented_at(1, 1).is_none());
//! assert!(!board.is_playing_animation());
//! ```

pub mod animation;
pub mod board;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod piece;
pub mod render;
pub mod rng;
pub mod snapshot;

pub use stone_grid_types as types;

// Re-export commonly used types for convenience
pub use animation::{AnimationEntry, AnimationQueue, Landing};
pub use board::StoneBoard;
pub use config::BoardConfig;
pub use geometry::Geometry;
pub use grid::{StoneGrid, StoneTable};
pub use piece::{Falling, Stone, Swapping};
pub use render::{AssetCatalog, RenderTarget, StoneTransform};
pub use rng::{spawn_fall_speed, RandomSource, SimpleRng};
pub use snapshot::{BoardSnapshot, StoneSnapshot};
pub use types::{RotateMode, StoneError, StoneId, StoneKind};
