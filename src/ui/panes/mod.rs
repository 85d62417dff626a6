//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`board`]: the visible window of the grid with cursor and tool anchor
//! - [`info`]: generation, population, cache and render progress
//! - [`status`]: status bar with keybindings and play state
//!
//! Each pane module exports a `render_*` function taking the frame, its area,
//! and borrowed state. None of them mutate the simulation.

pub mod board;
pub mod info;
pub mod status;

pub use board::{render_board_pane, Viewport};
pub use info::{render_info_pane, InfoRenderData};
pub use status::render_status_bar;
