//! Incremental render controller
//!
//! Drives the [`FrameGraph`] to materialize many generations from a starting
//! fingerprint without ever computing the same transition twice.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──request──▶ Running ──last generation──▶ Completed
//!                      │
//!                      └──cancel──▶ Idle
//! ```
//!
//! A request first fast-forwards along whatever the graph already knows. Only
//! from the frontier onward is the stepper called, one generation per step,
//! and each transition is recorded the moment it is computed. Cancelling or
//! dropping the controller mid-render therefore loses nothing: the next
//! request from the same start resumes where the last one stopped.
//!
//! Work happens in [`RenderController::tick`], which steps until a time
//! budget runs out so the host can redraw, report progress, or cancel between
//! slices.

use super::store::ChainFile;
use super::{ExportedChain, FrameGraph};
use crate::config::ETA_WINDOW;
use crate::errors::LifeError;
use crate::life::{canonicalize, parse, step_with, Fingerprint, LiveSet, Rule};
use log::{debug, trace, warn};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Identifier handed out by a controller for each accepted request
pub type RenderId = u64;

/// Progress record of one batch render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub id: RenderId,
    pub start_fingerprint: Fingerprint,
    pub generation_count: usize,
    pub current_fingerprint: Fingerprint,
    pub current_generation_count: usize,
}

impl RenderRequest {
    pub fn remaining(&self) -> usize {
        self.generation_count - self.current_generation_count
    }
}

/// What a progress observer sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProgress {
    /// Waiting behind another render
    pub queued: bool,
    /// 0..=100
    pub percentage: u8,
    pub time_to_completion_estimate_millis: u64,
    pub requested: RenderRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Running,
    Completed,
}

/// A finished render and the fingerprint it arrived at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub request: RenderRequest,
    pub frame: Fingerprint,
}

#[derive(Debug)]
struct ActiveRender {
    request: RenderRequest,
    /// Decoded board for `request.current_fingerprint`, kept between steps
    board: Option<LiveSet>,
}

/// Owns the frame graph and renders into it
#[derive(Debug)]
pub struct RenderController {
    graph: FrameGraph,
    rule: Rule,
    state: RenderState,
    active: Option<ActiveRender>,
    queue: VecDeque<RenderRequest>,
    completed: VecDeque<RenderOutcome>,
    next_id: RenderId,
    /// Wall-clock cost of the most recent steps, newest last
    step_costs: VecDeque<Duration>,
}

impl RenderController {
    pub fn new(rule: Rule) -> Self {
        RenderController::with_graph(FrameGraph::new(), rule)
    }

    /// Resume with a graph built earlier, e.g. from imported chains
    pub fn with_graph(graph: FrameGraph, rule: Rule) -> Self {
        RenderController {
            graph,
            rule,
            state: RenderState::Idle,
            active: None,
            queue: VecDeque::new(),
            completed: VecDeque::new(),
            next_id: 1,
            step_costs: VecDeque::with_capacity(ETA_WINDOW),
        }
    }

    pub fn graph(&self) -> &FrameGraph {
        &self.graph
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Switch rules. Recorded transitions belong to the old rule, so the
    /// graph and every pending render are discarded.
    pub fn set_rule(&mut self, rule: Rule) {
        if rule == self.rule {
            return;
        }
        debug!("rule changed {} -> {}, clearing {} transitions", self.rule, rule, self.graph.len());
        self.rule = rule;
        self.graph.clear();
        self.active = None;
        self.queue.clear();
        self.step_costs.clear();
        self.state = RenderState::Idle;
    }

    pub fn import_chains(&mut self, chains: &[ExportedChain]) {
        for chain in chains {
            self.graph.import_chain(chain);
        }
    }

    /// Export every starter's chain for persistence
    pub fn export_chains(&self) -> Vec<ExportedChain> {
        let mut starters: Vec<&Fingerprint> = self.graph.starters().collect();
        starters.sort();
        starters
            .into_iter()
            .map(|starter| self.graph.export_chain(starter))
            .collect()
    }

    /// Import a chain file, refusing one rendered under another rule
    pub fn import_chain_file(&mut self, file: &ChainFile) -> Result<(), LifeError> {
        if file.rule != self.rule {
            return Err(LifeError::RuleMismatch {
                expected: self.rule.to_string(),
                found: file.rule.to_string(),
            });
        }
        self.import_chains(&file.chains);
        Ok(())
    }

    pub fn export_chain_file(&self) -> ChainFile {
        ChainFile {
            rule: self.rule,
            chains: self.export_chains(),
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// True while a render is running or waiting
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty()
    }

    /// Ask for `generation_count` generations after `start`
    ///
    /// The render starts at once if nothing else is running, otherwise it is
    /// queued. A request the graph can already answer completes immediately.
    pub fn request(
        &mut self,
        start: Fingerprint,
        generation_count: usize,
    ) -> Result<RenderId, LifeError> {
        if generation_count == 0 {
            return Err(LifeError::InvalidGenerationCount {
                requested: generation_count,
            });
        }
        // Reject garbage now rather than when the frontier is reached
        if !self.graph.has_next(&start) {
            parse(&start)?;
        }

        let id = self.next_id;
        self.next_id += 1;

        let request = RenderRequest {
            id,
            start_fingerprint: start.clone(),
            generation_count,
            current_fingerprint: start,
            current_generation_count: 0,
        };

        if self.active.is_none() && self.queue.is_empty() {
            self.activate(request);
        } else {
            debug!("render {} queued behind {} other(s)", id, self.queue.len() + 1);
            self.queue.push_back(request);
        }

        Ok(id)
    }

    /// Step the active render until `budget` has elapsed or nothing is left
    ///
    /// At least one step is taken per call while work remains.
    pub fn tick(&mut self, budget: Duration) -> Result<RenderState, LifeError> {
        let deadline = Instant::now().checked_add(budget);

        loop {
            if self.active.is_none() {
                match self.queue.pop_front() {
                    Some(request) => {
                        self.activate(request);
                        continue;
                    }
                    None => return Ok(self.state),
                }
            }

            let Some(mut active) = self.active.take() else {
                continue;
            };

            match self.advance(&mut active) {
                Ok(true) => self.finish(active),
                Ok(false) => self.active = Some(active),
                Err(e) => {
                    warn!("render {} abandoned: {}", active.request.id, e);
                    self.state = RenderState::Idle;
                    return Err(e);
                }
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(self.state);
            }
        }
    }

    /// Run every pending render to the end
    pub fn run_to_completion(&mut self) -> Result<(), LifeError> {
        while self.is_busy() {
            self.tick(Duration::MAX)?;
        }
        Ok(())
    }

    /// Render `generation_count` generations after `start` and return the result
    ///
    /// Anything already queued runs first; its outcomes stay available through
    /// [`RenderController::take_completed`].
    pub fn render_now(
        &mut self,
        start: Fingerprint,
        generation_count: usize,
    ) -> Result<Fingerprint, LifeError> {
        let id = self.request(start, generation_count)?;
        self.run_to_completion()?;

        let position = self
            .completed
            .iter()
            .position(|outcome| outcome.request.id == id);
        match position.and_then(|i| self.completed.remove(i)) {
            Some(outcome) => Ok(outcome.frame),
            None => Err(LifeError::InvalidArgument {
                message: format!("render {} was cancelled", id),
            }),
        }
    }

    /// Oldest finished render not yet collected
    pub fn take_completed(&mut self) -> Option<RenderOutcome> {
        self.completed.pop_front()
    }

    /// Stop a running or queued render. Transitions already recorded stay.
    pub fn cancel(&mut self, id: RenderId) -> Option<RenderRequest> {
        if self.active.as_ref().is_some_and(|a| a.request.id == id) {
            let active = self.active.take()?;
            debug!(
                "render {} cancelled at {}/{}",
                id, active.request.current_generation_count, active.request.generation_count
            );
            self.state = RenderState::Idle;
            return Some(active.request);
        }

        let position = self.queue.iter().position(|r| r.id == id)?;
        self.queue.remove(position)
    }

    /// Progress of the running render
    pub fn progress(&self) -> Option<RenderProgress> {
        self.active
            .as_ref()
            .map(|active| self.progress_for(&active.request, false))
    }

    /// Progress of a running or queued render
    pub fn progress_of(&self, id: RenderId) -> Option<RenderProgress> {
        if let Some(active) = self.active.as_ref().filter(|a| a.request.id == id) {
            return Some(self.progress_for(&active.request, false));
        }
        self.queue
            .iter()
            .find(|r| r.id == id)
            .map(|r| self.progress_for(r, true))
    }

    /// Advance a board by one generation through the cache
    pub fn successor(&mut self, live: &LiveSet) -> Result<LiveSet, LifeError> {
        let current = canonicalize(live);
        if let Some(next) = self.graph.next(&current) {
            return parse(next);
        }

        let next = step_with(live, &self.rule);
        self.graph.record_transition(current, canonicalize(&next));
        Ok(next)
    }

    fn activate(&mut self, request: RenderRequest) {
        debug!(
            "render {} started: {} generations from a {}-cell board",
            request.id,
            request.generation_count,
            request.start_fingerprint.cell_count()
        );
        self.graph.add_starter(request.start_fingerprint.clone());

        let mut active = ActiveRender {
            request,
            board: None,
        };
        if self.fast_forward(&mut active) {
            self.finish(active);
        } else {
            self.state = RenderState::Running;
            self.active = Some(active);
        }
    }

    /// Skip along recorded transitions. Returns true if that finished the render.
    fn fast_forward(&self, active: &mut ActiveRender) -> bool {
        let request = &mut active.request;
        let walk = self.graph.walk(&request.current_fingerprint);

        if let Some(frame) = walk.frame_at(request.remaining()) {
            request.current_fingerprint = frame.clone();
            request.current_generation_count = request.generation_count;
            active.board = None;
            return true;
        }

        // Not enough known; move to the frontier
        let skipped = walk.frames.len() - 1;
        if skipped > 0 {
            trace!("render {} fast-forwarded {} generations", request.id, skipped);
            if let Some(last) = walk.frames.last() {
                request.current_fingerprint = last.clone();
            }
            request.current_generation_count += skipped;
            active.board = None;
        }
        false
    }

    /// Compute one uncached generation. Returns true if the render is done.
    fn advance(&mut self, active: &mut ActiveRender) -> Result<bool, LifeError> {
        let board = match active.board.take() {
            Some(board) => board,
            None => parse(&active.request.current_fingerprint)?,
        };

        let started = Instant::now();
        let next = step_with(&board, &self.rule);
        let next_fingerprint = canonicalize(&next);
        self.graph.record_transition(
            active.request.current_fingerprint.clone(),
            next_fingerprint.clone(),
        );
        self.record_step_cost(started.elapsed());

        let request = &mut active.request;
        request.current_fingerprint = next_fingerprint;
        request.current_generation_count += 1;
        active.board = Some(next);
        trace!(
            "render {} at {}/{}",
            request.id,
            request.current_generation_count,
            request.generation_count
        );

        if request.current_generation_count >= request.generation_count {
            return Ok(true);
        }

        // Stepped into territory an earlier render already covered
        if self.graph.has_next(&active.request.current_fingerprint) {
            return Ok(self.fast_forward(active));
        }
        Ok(false)
    }

    fn finish(&mut self, active: ActiveRender) {
        let request = active.request;
        debug!(
            "render {} completed: {} generations",
            request.id, request.generation_count
        );
        self.state = RenderState::Completed;
        self.completed.push_back(RenderOutcome {
            frame: request.current_fingerprint.clone(),
            request,
        });
    }

    fn record_step_cost(&mut self, cost: Duration) {
        if self.step_costs.len() == ETA_WINDOW {
            self.step_costs.pop_front();
        }
        self.step_costs.push_back(cost);
    }

    fn average_step_cost(&self) -> Duration {
        if self.step_costs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.step_costs.iter().sum();
        total / self.step_costs.len() as u32
    }

    fn progress_for(&self, request: &RenderRequest, queued: bool) -> RenderProgress {
        let percentage = (request.current_generation_count as f64
            / request.generation_count as f64
            * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8;
        let estimate = self.average_step_cost().as_secs_f64() * 1000.0 * request.remaining() as f64;

        RenderProgress {
            queued,
            percentage,
            time_to_completion_estimate_millis: estimate.round() as u64,
            requested: request.clone(),
        }
    }
}
