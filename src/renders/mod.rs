//! Memoized frame graph ("renders")
//!
//! This module records which board state follows which:
//! - [`FrameGraph`]: fingerprint → successor-fingerprint edges plus starters
//! - [`controller`]: incremental, resumable batch rendering into the graph
//! - [`store`]: JSON persistence of exported chains
//!
//! # Graph Shape
//!
//! Every edge was produced by one application of the stepper, so each node has
//! at most one successor. Walking from any node therefore ends in one of two
//! ways:
//! ```text
//! A → B → C → (nothing recorded)     frontier at C
//! A → B → C → B                      cycle entered at B
//! ```
//! A still life is a cycle of length one (`X → X`).

pub mod controller;
pub mod store;

use crate::life::Fingerprint;
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// How a walk through the graph ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    /// The last frame has no recorded successor
    Frontier,
    /// The last frame's successor is `frames[start]`
    Cycle { start: usize },
}

/// The frames visited walking successors from a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Starting node first; never repeats a fingerprint
    pub frames: Vec<Fingerprint>,
    pub end: WalkEnd,
}

impl Walk {
    /// Length of the loop the walk ended in, if any
    pub fn period(&self) -> Option<usize> {
        match self.end {
            WalkEnd::Cycle { start } => Some(self.frames.len() - start),
            WalkEnd::Frontier => None,
        }
    }

    /// How far past the start the graph knows, `Infinite` once a loop closes
    pub fn generation_count(&self) -> GenerationCount {
        match self.end {
            WalkEnd::Frontier => GenerationCount::Finite(self.frames.len() - 1),
            WalkEnd::Cycle { .. } => GenerationCount::Infinite,
        }
    }

    /// Fingerprint `generations` steps after the start, if the graph knows it
    ///
    /// Cycles are followed arithmetically, so any number of generations past a
    /// known loop resolves without walking it.
    pub fn frame_at(&self, generations: usize) -> Option<&Fingerprint> {
        if generations < self.frames.len() {
            return self.frames.get(generations);
        }
        match self.end {
            WalkEnd::Frontier => None,
            WalkEnd::Cycle { start } => {
                let period = self.frames.len() - start;
                self.frames.get(start + (generations - start) % period)
            }
        }
    }
}

/// Number of generations known past a starting state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationCount {
    /// Steps until the frontier
    Finite(usize),
    /// The chain loops; it never reaches a frontier
    Infinite,
}

/// Outcome of [`FrameGraph::record_transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionWrite {
    Inserted,
    /// The same edge was already present
    Unchanged,
    /// A different successor was replaced
    Overwritten,
}

/// A contiguous run of the graph in its persisted shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedChain {
    pub starter: Fingerprint,
    pub frames: Vec<Fingerprint>,
}

/// Fingerprint → successor edges built up as generations are computed
#[derive(Debug, Clone, Default)]
pub struct FrameGraph {
    transitions: FxHashMap<Fingerprint, Fingerprint>,
    starters: FxHashSet<Fingerprint>,
}

impl FrameGraph {
    pub fn new() -> Self {
        FrameGraph::default()
    }

    /// Mark a fingerprint as a point renders may resume from
    pub fn add_starter(&mut self, fingerprint: Fingerprint) {
        self.starters.insert(fingerprint);
    }

    pub fn is_starter(&self, fingerprint: &Fingerprint) -> bool {
        self.starters.contains(fingerprint)
    }

    pub fn starters(&self) -> impl Iterator<Item = &Fingerprint> {
        self.starters.iter()
    }

    pub fn has_next(&self, fingerprint: &Fingerprint) -> bool {
        self.transitions.contains_key(fingerprint)
    }

    /// Recorded successor, or `None` at the frontier
    pub fn next(&self, fingerprint: &Fingerprint) -> Option<&Fingerprint> {
        self.transitions.get(fingerprint)
    }

    /// Insert or replace the edge `from → to`
    pub fn record_transition(&mut self, from: Fingerprint, to: Fingerprint) -> TransitionWrite {
        match self.transitions.get(&from) {
            Some(existing) if *existing == to => TransitionWrite::Unchanged,
            Some(_) => {
                self.transitions.insert(from, to);
                TransitionWrite::Overwritten
            }
            None => {
                self.transitions.insert(from, to);
                TransitionWrite::Inserted
            }
        }
    }

    /// Follow successors from `fingerprint` until the frontier or a repeat
    pub fn walk(&self, fingerprint: &Fingerprint) -> Walk {
        let mut frames = vec![fingerprint.clone()];
        let mut positions: FxHashMap<&Fingerprint, usize> = FxHashMap::default();
        positions.insert(fingerprint, 0);

        let mut current = fingerprint;
        while let Some(next) = self.transitions.get(current) {
            if let Some(&start) = positions.get(next) {
                return Walk {
                    frames,
                    end: WalkEnd::Cycle { start },
                };
            }
            positions.insert(next, frames.len());
            frames.push(next.clone());
            current = next;
        }

        Walk {
            frames,
            end: WalkEnd::Frontier,
        }
    }

    pub fn is_cyclic(&self, fingerprint: &Fingerprint) -> bool {
        matches!(self.walk(fingerprint).end, WalkEnd::Cycle { .. })
    }

    pub fn generation_count(&self, fingerprint: &Fingerprint) -> GenerationCount {
        self.walk(fingerprint).generation_count()
    }

    /// Frames from `fingerprint` up to the frontier or the first repeat
    pub fn frames_from(&self, fingerprint: &Fingerprint) -> Vec<Fingerprint> {
        self.walk(fingerprint).frames
    }

    pub fn last_known_frame(&self, fingerprint: &Fingerprint) -> Fingerprint {
        let mut frames = self.walk(fingerprint).frames;
        // A walk always holds at least its starting frame
        frames.pop().unwrap_or_else(|| fingerprint.clone())
    }

    /// Loop length if the chain is cyclic: 1 for a still life, N for a period-N oscillator
    pub fn cycle_period(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.walk(fingerprint).period()
    }

    /// The chain from `fingerprint` in persisted form
    ///
    /// For a cyclic chain the loop-entry frame is repeated at the end so the
    /// closing edge is preserved.
    pub fn export_chain(&self, fingerprint: &Fingerprint) -> ExportedChain {
        let walk = self.walk(fingerprint);
        let mut frames = walk.frames;
        if let WalkEnd::Cycle { start } = walk.end {
            let entry = frames[start].clone();
            frames.push(entry);
        }
        ExportedChain {
            starter: fingerprint.clone(),
            frames,
        }
    }

    /// Relink every consecutive pair of an exported chain and mark its starter
    pub fn import_chain(&mut self, chain: &ExportedChain) {
        if chain.frames.first() != Some(&chain.starter) {
            warn!(
                "imported chain does not begin at its starter ({} frames)",
                chain.frames.len()
            );
        }
        for pair in chain.frames.windows(2) {
            self.record_transition(pair[0].clone(), pair[1].clone());
        }
        self.add_starter(chain.starter.clone());
    }

    /// Number of recorded transitions
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
        self.starters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(name: &str) -> Fingerprint {
        Fingerprint::from_raw(name)
    }

    fn chain(graph: &mut FrameGraph, names: &[&str]) {
        for pair in names.windows(2) {
            graph.record_transition(fp(pair[0]), fp(pair[1]));
        }
    }

    #[test]
    fn test_unknown_fingerprint_is_frontier() {
        let graph = FrameGraph::new();
        assert!(!graph.has_next(&fp("a")));
        assert_eq!(graph.next(&fp("a")), None);
        assert!(!graph.is_cyclic(&fp("a")));
        assert_eq!(graph.generation_count(&fp("a")), GenerationCount::Finite(0));
        assert_eq!(graph.frames_from(&fp("a")), vec![fp("a")]);
        assert_eq!(graph.last_known_frame(&fp("a")), fp("a"));
    }

    #[test]
    fn test_linear_chain() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b", "c", "d", "e", "f"]);

        assert_eq!(graph.generation_count(&fp("a")), GenerationCount::Finite(5));
        assert_eq!(graph.generation_count(&fp("d")), GenerationCount::Finite(2));
        assert!(!graph.is_cyclic(&fp("a")));
        assert_eq!(graph.last_known_frame(&fp("a")), fp("f"));
        assert_eq!(graph.frames_from(&fp("c")), vec![fp("c"), fp("d"), fp("e"), fp("f")]);
        assert_eq!(graph.cycle_period(&fp("a")), None);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b", "c", "d", "b"]);

        assert!(graph.is_cyclic(&fp("a")));
        assert_eq!(graph.generation_count(&fp("a")), GenerationCount::Infinite);
        assert_eq!(
            graph.frames_from(&fp("a")),
            vec![fp("a"), fp("b"), fp("c"), fp("d")]
        );
        assert_eq!(graph.last_known_frame(&fp("a")), fp("d"));
        assert_eq!(graph.cycle_period(&fp("a")), Some(3));
    }

    #[test]
    fn test_one_walk_answers_count_and_period() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b", "c", "b"]);
        chain(&mut graph, &["p", "q", "r"]);

        let looping = graph.walk(&fp("a"));
        assert_eq!(looping.generation_count(), graph.generation_count(&fp("a")));
        assert_eq!(looping.period(), graph.cycle_period(&fp("a")));
        assert_eq!(looping.period(), Some(2));

        let open = graph.walk(&fp("p"));
        assert_eq!(open.generation_count(), GenerationCount::Finite(2));
        assert_eq!(open.period(), None);
    }

    #[test]
    fn test_still_life_is_period_one() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["x", "x"]);
        assert!(graph.is_cyclic(&fp("x")));
        assert_eq!(graph.generation_count(&fp("x")), GenerationCount::Infinite);
        assert_eq!(graph.frames_from(&fp("x")), vec![fp("x")]);
        assert_eq!(graph.cycle_period(&fp("x")), Some(1));
    }

    #[test]
    fn test_record_transition_outcomes() {
        let mut graph = FrameGraph::new();
        assert_eq!(graph.record_transition(fp("a"), fp("b")), TransitionWrite::Inserted);
        assert_eq!(graph.record_transition(fp("a"), fp("b")), TransitionWrite::Unchanged);
        assert_eq!(graph.record_transition(fp("a"), fp("c")), TransitionWrite::Overwritten);
        assert_eq!(graph.next(&fp("a")), Some(&fp("c")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_starters_are_idempotent() {
        let mut graph = FrameGraph::new();
        graph.add_starter(fp("a"));
        graph.add_starter(fp("a"));
        assert!(graph.is_starter(&fp("a")));
        assert_eq!(graph.starters().count(), 1);
    }

    #[test]
    fn test_walk_frame_at_follows_cycle() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b", "c", "b"]);
        let walk = graph.walk(&fp("a"));

        assert_eq!(walk.frame_at(0), Some(&fp("a")));
        assert_eq!(walk.frame_at(2), Some(&fp("c")));
        assert_eq!(walk.frame_at(3), Some(&fp("b")));
        assert_eq!(walk.frame_at(4), Some(&fp("c")));
        assert_eq!(walk.frame_at(1_000_001), Some(&fp("b")));
    }

    #[test]
    fn test_walk_frame_at_stops_at_frontier() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b"]);
        let walk = graph.walk(&fp("a"));
        assert_eq!(walk.frame_at(1), Some(&fp("b")));
        assert_eq!(walk.frame_at(2), None);
    }

    #[test]
    fn test_export_keeps_cycle_closing_edge() {
        let mut graph = FrameGraph::new();
        chain(&mut graph, &["a", "b", "c", "b"]);
        let exported = graph.export_chain(&fp("a"));
        assert_eq!(exported.frames, vec![fp("a"), fp("b"), fp("c"), fp("b")]);

        let mut fresh = FrameGraph::new();
        fresh.import_chain(&exported);
        assert!(fresh.is_starter(&fp("a")));
        assert!(fresh.is_cyclic(&fp("a")));
        assert_eq!(fresh.frames_from(&fp("a")), graph.frames_from(&fp("a")));
    }

    #[test]
    fn test_import_relinks_best_effort() {
        let mut graph = FrameGraph::new();
        graph.record_transition(fp("b"), fp("old"));
        graph.import_chain(&ExportedChain {
            starter: fp("z"),
            frames: vec![fp("a"), fp("b"), fp("c")],
        });
        assert!(graph.is_starter(&fp("z")));
        assert_eq!(graph.next(&fp("a")), Some(&fp("b")));
        assert_eq!(graph.next(&fp("b")), Some(&fp("c")));
    }
}
