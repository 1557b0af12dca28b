//! Stone grid (workspace facade crate).
//!
//! Re-exports the board state machine (`core`), its shared value types
//! (`types`) and the terminal render collaborator (`term`), plus the pieces
//! the `stone-grid` binary is assembled from.

pub use stone_grid_core as core;
pub use stone_grid_term as term;
pub use stone_grid_types as types;

pub mod cli;
pub mod director;
