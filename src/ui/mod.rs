//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: editor state, keyboard event loop, play mode, background renders
//! - **[`panes`]**: stateless render functions for each visible pane (board,
//!   info, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a starting board and a
//! [`RenderController`], then call [`App::run`] to start the event loop.
//!
//! [`RenderController`]: crate::renders::controller::RenderController
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
