//! Main TUI application state and logic

use crate::config::{Settings, FILL_MARGIN, FLOOD_FILL_LIMIT, PLAY_INTERVAL, TICK_BUDGET};
use crate::errors::LifeError;
use crate::geometry::shapes::{box_outline, flood_fill, line};
use crate::geometry::{corners_of, Coordinate, Region};
use crate::history::HistoryStack;
use crate::life::{parse, LiveSet};
use crate::patterns::PATTERNS;
use crate::renders::controller::{RenderController, RenderId, RenderState};
use crate::ui::panes::{self, InfoRenderData, Viewport};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Two-point drawing tools waiting for their second point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Line,
    Box,
}

impl Tool {
    fn name(self) -> &'static str {
        match self {
            Tool::Line => "line",
            Tool::Box => "box",
        }
    }
}

/// What undo/redo restores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub board: LiveSet,
    pub generation: usize,
}

/// The main application state
pub struct App {
    pub board: LiveSet,
    pub generation: usize,
    pub history: HistoryStack<BoardSnapshot>,
    pub controller: RenderController,

    pub cursor: Coordinate,
    /// First point of a pending line or box
    pub anchor: Option<(Tool, Coordinate)>,
    pub viewport: Viewport,

    /// Generations requested by the `r` key
    pub render_generations: usize,
    pub pending_render: Option<RenderId>,

    /// Index into [`PATTERNS`] for the `p` key
    pub pattern_index: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a generation was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    pub fn new(
        board: LiveSet,
        controller: RenderController,
        settings: &Settings,
    ) -> Result<Self, LifeError> {
        let mut history = HistoryStack::new(settings.history_length)?;
        history.push_state(BoardSnapshot {
            board: board.clone(),
            generation: 0,
        });

        let cursor = board
            .bounds()
            .map(|r| Coordinate::new(r.row, r.col))
            .unwrap_or_default();
        let pattern_index = PATTERNS
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(&settings.pattern))
            .unwrap_or(0);

        Ok(App {
            board,
            generation: 0,
            history,
            controller,
            cursor,
            anchor: None,
            viewport: Viewport::centered_on(cursor, 20, 60),
            render_generations: settings.generations,
            pending_render: None,
            pattern_index,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            is_playing: false,
            last_play_time: Instant::now(),
        })
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.pending_render.is_some() {
                let result = self.poll_render();
                self.report(result);
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                let result = self.step_once();
                self.report(result);
                self.last_play_time = Instant::now();
            }

            // Sleep less while there is background work
            let timeout = if self.pending_render.is_some() {
                Duration::from_millis(1)
            } else {
                Duration::from_millis(30)
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(34)])
            .split(main_chunks[0]);

        let anchor = self.anchor.map(|(_, point)| point);
        panes::render_board_pane(
            frame,
            columns[0],
            &self.board,
            self.cursor,
            anchor,
            &mut self.viewport,
            self.generation,
        );

        let graph = self.controller.graph();
        let walk = graph.walk(&self.board.fingerprint());
        let tool = match self.anchor {
            Some((tool, _)) => tool.name(),
            None => "toggle",
        };
        let data = InfoRenderData {
            generation: self.generation,
            population: self.board.len(),
            bounds: self.board.bounds(),
            rule: self.controller.rule(),
            transitions: graph.len(),
            starters: graph.starters().count(),
            known_future: walk.generation_count(),
            cycle_period: walk.period(),
            history_index: self.history.index(),
            history_len: self.history.len(),
            tool,
            progress: self.controller.progress(),
        };
        panes::render_info_pane(frame, columns[1], &data);

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.status_is_error,
            self.is_playing,
            self.pending_render.is_some(),
        );
    }

    /// Show the outcome of an action in the status bar
    fn report(&mut self, result: Result<(), LifeError>) {
        match result {
            Ok(()) => self.status_is_error = false,
            Err(e) => {
                self.is_playing = false;
                self.status_message = format!("Error: {}", e);
                self.status_is_error = true;
            }
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char('x') => {
                self.toggle_cell();
                Ok(())
            }
            KeyCode::Char('n') => {
                self.is_playing = false;
                self.step_once()
            }
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(PLAY_INTERVAL)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
                Ok(())
            }
            KeyCode::Char('r') => self.start_render(),
            KeyCode::Esc => {
                self.cancel();
                Ok(())
            }
            KeyCode::Char('u') => {
                self.is_playing = false;
                self.undo();
                Ok(())
            }
            KeyCode::Char('U') => {
                self.is_playing = false;
                self.redo();
                Ok(())
            }
            KeyCode::Char('l') => self.use_tool(Tool::Line),
            KeyCode::Char('b') => self.use_tool(Tool::Box),
            KeyCode::Char('f') => self.fill(),
            KeyCode::Char('c') => {
                self.is_playing = false;
                self.replace_board(LiveSet::new(), 0);
                self.status_message = "Cleared".to_string();
                Ok(())
            }
            KeyCode::Char('p') => {
                self.next_pattern();
                Ok(())
            }
            _ => Ok(()),
        };
        self.report(result);
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) -> Result<(), LifeError> {
        self.cursor = self
            .cursor
            .offset(d_row, d_col)
            .ok_or_else(|| LifeError::InvalidArgument {
                message: String::from("cursor is at the edge of the grid"),
            })?;
        Ok(())
    }

    /// Record the current board as a new history entry
    fn commit(&mut self) {
        self.history.push_state(BoardSnapshot {
            board: self.board.clone(),
            generation: self.generation,
        });
    }

    fn replace_board(&mut self, board: LiveSet, generation: usize) {
        self.board = board;
        self.generation = generation;
        self.commit();
    }

    fn toggle_cell(&mut self) {
        let alive = self.board.toggle(self.cursor);
        self.commit();
        self.status_message = format!(
            "({}, {}) {}",
            self.cursor.row,
            self.cursor.col,
            if alive { "born" } else { "killed" }
        );
    }

    /// Advance one generation through the cache
    fn step_once(&mut self) -> Result<(), LifeError> {
        let next = self.controller.successor(&self.board)?;
        let generation = self.generation + 1;
        self.replace_board(next, generation);
        if self.is_playing {
            self.status_message = "Playing...".to_string();
        } else {
            self.status_message = format!("Generation {}", generation);
        }
        Ok(())
    }

    fn start_render(&mut self) -> Result<(), LifeError> {
        if self.pending_render.is_some() {
            self.status_message = "A render is already running".to_string();
            return Ok(());
        }
        self.is_playing = false;
        let id = self
            .controller
            .request(self.board.fingerprint(), self.render_generations)?;
        info!("render {} requested for {} generations", id, self.render_generations);
        self.pending_render = Some(id);
        self.status_message = format!("Rendering {} generations...", self.render_generations);
        self.poll_render()
    }

    /// Give the controller one time slice and apply a finished render
    pub fn poll_render(&mut self) -> Result<(), LifeError> {
        let state = match self.controller.tick(TICK_BUDGET) {
            Ok(state) => state,
            Err(e) => {
                self.pending_render = None;
                return Err(e);
            }
        };
        if state == RenderState::Running {
            return Ok(());
        }

        while let Some(outcome) = self.controller.take_completed() {
            if Some(outcome.request.id) != self.pending_render {
                continue;
            }
            self.pending_render = None;

            // Edits made while rendering win over the stale result
            if outcome.request.start_fingerprint != self.board.fingerprint() {
                self.status_message =
                    "Render finished for an older board; result kept in cache".to_string();
                return Ok(());
            }

            let board = parse(&outcome.frame)?;
            let generation = self.generation + outcome.request.generation_count;
            self.replace_board(board, generation);
            self.status_message = format!(
                "Rendered {} generations",
                outcome.request.generation_count
            );
        }

        if self.pending_render.is_some() && !self.controller.is_busy() {
            self.pending_render = None;
        }
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending_render.take() {
            if let Some(request) = self.controller.cancel(id) {
                self.status_message = format!(
                    "Render cancelled at {}/{}",
                    request.current_generation_count, request.generation_count
                );
            }
        } else if self.anchor.take().is_some() {
            self.status_message = "Tool cancelled".to_string();
        }
    }

    fn restore(&mut self, snapshot: BoardSnapshot) {
        self.board = snapshot.board;
        self.generation = snapshot.generation;
    }

    fn undo(&mut self) {
        if !self.history.can_go_back() {
            self.status_message = "Nothing to undo".to_string();
            return;
        }
        if let Ok(snapshot) = self.history.back() {
            let snapshot = snapshot.clone();
            self.restore(snapshot);
            self.status_message = "Undo".to_string();
        }
    }

    fn redo(&mut self) {
        if !self.history.can_go_forward() {
            self.status_message = "Nothing to redo".to_string();
            return;
        }
        if let Ok(snapshot) = self.history.forward() {
            let snapshot = snapshot.clone();
            self.restore(snapshot);
            self.status_message = "Redo".to_string();
        }
    }

    /// First press drops the anchor, second press draws to the cursor
    fn use_tool(&mut self, tool: Tool) -> Result<(), LifeError> {
        let Some((pending, anchor)) = self.anchor else {
            self.anchor = Some((tool, self.cursor));
            self.status_message = format!("{} from ({}, {})", tool.name(), self.cursor.row, self.cursor.col);
            return Ok(());
        };
        if pending != tool {
            self.anchor = Some((tool, anchor));
            self.status_message = format!("{} from ({}, {})", tool.name(), anchor.row, anchor.col);
            return Ok(());
        }

        let cells = match tool {
            Tool::Line => line(anchor, self.cursor),
            Tool::Box => box_outline(&corners_of(&[anchor, self.cursor])?),
        };
        self.anchor = None;
        let drawn = cells.len();
        self.board.extend(cells);
        self.commit();
        self.status_message = format!("Drew {} with {} cells", tool.name(), drawn);
        Ok(())
    }

    /// Region a fill may spread over: the live cells and cursor, plus a margin
    fn fill_bounds(&self) -> Result<Region, LifeError> {
        let mut points = vec![self.cursor];
        if let Some(bounds) = self.board.bounds() {
            points.push(Coordinate::new(bounds.row, bounds.col));
            points.push(Coordinate::new(
                bounds.bottom_side() as i32,
                bounds.right_side() as i32,
            ));
        }
        Ok(corners_of(&points)?.expanded(FILL_MARGIN))
    }

    fn fill(&mut self) -> Result<(), LifeError> {
        if self.board.contains(self.cursor) {
            self.status_message = "Fill must start on a dead cell".to_string();
            return Ok(());
        }
        let bounds = self.fill_bounds()?;
        let board = &self.board;
        let cells = flood_fill(self.cursor, &bounds, |c| !board.contains(c), FLOOD_FILL_LIMIT)?;
        debug!("filled {} cells inside {:?}", cells.len(), bounds);
        let filled = cells.len();
        self.board.extend(cells);
        self.commit();
        self.status_message = format!("Filled {} cells", filled);
        Ok(())
    }

    fn next_pattern(&mut self) {
        self.is_playing = false;
        self.pattern_index = (self.pattern_index + 1) % PATTERNS.len();
        let pattern = &PATTERNS[self.pattern_index];
        self.replace_board(pattern.live_set(), 0);
        self.cursor = Coordinate::default();
        self.status_message = format!("Pattern: {}", pattern.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Rule;
    use crate::patterns::find;
    use crossterm::event::KeyModifiers;

    fn app_with(pattern: &str) -> App {
        let settings = Settings {
            pattern: pattern.to_string(),
            generations: 4,
            ..Settings::default()
        };
        let board = find(pattern).unwrap().live_set();
        App::new(board, RenderController::new(Rule::CONWAY), &settings).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_step_and_undo() {
        let mut app = app_with("blinker");
        let start = app.board.clone();

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.generation, 1);
        assert_ne!(app.board, start);
        assert_eq!(app.controller.graph().len(), 1);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.generation, 0);
        assert_eq!(app.board, start);

        press(&mut app, KeyCode::Char('U'));
        assert_eq!(app.generation, 1);
        assert_ne!(app.board, start);
    }

    #[test]
    fn test_toggle_pushes_history() {
        let mut app = app_with("empty");
        press(&mut app, KeyCode::Enter);
        assert!(app.board.contains(Coordinate::new(0, 0)));
        assert_eq!(app.history.len(), 2);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.board.is_empty());
        assert_eq!(app.history.len(), 3);
    }

    #[test]
    fn test_render_jumps_board() {
        let mut app = app_with("glider");
        let start = app.board.fingerprint();
        press(&mut app, KeyCode::Char('r'));
        while app.pending_render.is_some() {
            app.poll_render().unwrap();
        }
        assert_eq!(app.generation, 4);
        assert_ne!(app.board.fingerprint(), start);
        // Glider moves one cell down and right every four generations
        let expected: LiveSet = find("glider")
            .unwrap()
            .cells
            .iter()
            .map(|&(r, c)| Coordinate::new(r + 1, c + 1))
            .collect();
        assert_eq!(app.board, expected);
        assert_eq!(app.controller.graph().len(), 4);
    }

    #[test]
    fn test_line_tool_needs_two_presses() {
        let mut app = app_with("empty");
        press(&mut app, KeyCode::Char('l'));
        assert!(app.board.is_empty());
        assert_eq!(app.anchor, Some((Tool::Line, Coordinate::new(0, 0))));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.anchor, None);
        assert_eq!(app.board.len(), 3);
    }

    #[test]
    fn test_escape_clears_anchor() {
        let mut app = app_with("empty");
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.anchor, None);
    }

    #[test]
    fn test_fill_inside_box() {
        let mut app = app_with("empty");
        press(&mut app, KeyCode::Char('b'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.board.len(), 16);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.board.len(), 25);
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_pattern_cycles() {
        let mut app = app_with("empty");
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(PATTERNS[app.pattern_index].name, "glider");
        assert_eq!(app.board.len(), 5);
    }
}
