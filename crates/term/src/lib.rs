//! Terminal render collaborator for the stone board.
//!
//! This is a small, game-oriented rendering layer for terminal play. It plugs
//! into the core draw contract instead of reading board internals: the board
//! submits each visible stone's transform and this crate turns it into
//! characters in a framebuffer, which is then flushed to a crossterm backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Exercise the same `draw` path a GPU backend would use
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod board_view;
pub mod fb;
pub mod redraw;
pub mod renderer;

pub use stone_grid_core as core;
pub use stone_grid_types as types;

pub use board_view::{BoardView, StoneGlyph, StonePalette, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use redraw::RedrawGate;
pub use renderer::{encode_frame_into, TerminalRenderer};
