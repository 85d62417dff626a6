//! # Introduction
//!
//! lifeframe runs Conway's Game of Life (and other Life-like rules) on an
//! unbounded grid and caches every generation it computes. Boards are keyed by
//! a canonical [`life::Fingerprint`], and each computed step is stored as an edge
//! `fingerprint → next fingerprint` in a [`renders::FrameGraph`]. Asking for the
//! future of a board that has been seen before is a walk along those edges;
//! only unseen territory is stepped.
//!
//! ## Pipeline
//!
//! ```text
//! LiveSet → canonicalize → Fingerprint → FrameGraph ⇄ RenderController → TUI
//!                                           ▲
//!                                     step (frontier only)
//! ```
//!
//! 1. [`geometry`]: coordinates, rectangular regions, and drawing shapes.
//! 2. [`life`]: the live-cell set, fingerprints, rules and the stepper.
//! 3. [`renders`]: the frame graph, cached walks, chain export, and the
//!    incremental [`renders::controller::RenderController`].
//! 4. [`history`]: bounded undo/redo over board snapshots.
//! 5. [`config`] and [`patterns`]: tunables, command-line settings, seed boards.
//! 6. [`ui`]: ratatui-based editor; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use lifeframe::life::{LiveSet, Rule};
//! use lifeframe::renders::controller::RenderController;
//! use lifeframe::renders::GenerationCount;
//! use lifeframe::geometry::Coordinate;
//!
//! let blinker: LiveSet = [(0, 0), (0, 1), (0, 2)]
//!     .into_iter()
//!     .map(Coordinate::from)
//!     .collect();
//!
//! let mut controller = RenderController::new(Rule::CONWAY);
//! let after = controller.render_now(blinker.fingerprint(), 1001).unwrap();
//!
//! // Period 2, so an odd number of generations lands on the vertical phase
//! assert_eq!(after.as_str(), "-1,1;0,1;1,1");
//! // Only two transitions were ever computed
//! assert_eq!(controller.graph().len(), 2);
//! assert_eq!(
//!     controller.graph().generation_count(&blinker.fingerprint()),
//!     GenerationCount::Infinite
//! );
//! ```

pub mod config;
pub mod errors;
pub mod geometry;
pub mod history;
pub mod life;
pub mod patterns;
pub mod renders;
pub mod ui;
