// src/session/mod.rs

//! The working state of one visualizer session: the grid, the active editing
//! tool, and whichever maze or search job is being stepped. Front ends own a
//! `Session` and call [`Session::tick`] at their own pace; nothing in here
//! knows about timers or drawing.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::error::GridError;
use crate::grid::{Cell, Grid};
use crate::maze::{CarveStep, MazeGenerator};
use crate::pathfinding::{AStar, SearchStatus, StepReport};

// --- Enums and Supporting Types ---

/// What a click on the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    SetStart,
    SetEnd,
    Wall,
}

impl Tool {
    /// Returns a user-friendly name for the tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::SetStart => "Set Start",
            Tool::SetEnd => "Set End",
            Tool::Wall => "Set Wall",
        }
    }

    /// Returns all available tools, in toolbar order.
    pub fn all() -> &'static [Tool] {
        &[Tool::SetStart, Tool::SetEnd, Tool::Wall]
    }
}

/// Search progress painted on top of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Frontier,
    Visited,
    Path,
}

/// The job currently being stepped.
enum Job {
    Idle,
    Generating(MazeGenerator<StdRng>),
    Searching(AStar),
}

/// What a call to [`Session::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Idle,
    MazeStep(CarveStep),
    MazeFinished { start: Cell, end: Cell },
    SearchStep(StepReport),
    PathFound(Vec<Cell>),
    NoPath,
}

impl SessionEvent {
    /// True for events that end a job.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            SessionEvent::MazeFinished { .. } | SessionEvent::PathFound(_) | SessionEvent::NoPath
        )
    }
}

// --- Main Session Struct ---

pub struct Session {
    config: AppConfig,
    grid: Grid,
    current_tool: Option<Tool>,
    job: Job,

    /// Per-cell search overlay, indexed like the grid.
    overlay: Vec<Overlay>,
    /// Node expanded by the latest search step and the neighbors it looked at.
    current: Option<Cell>,
    neighbors: Vec<Cell>,
    /// Result of the last finished search.
    path: Vec<Cell>,

    pub status_message: String,
}

impl Session {
    /// Creates a session with an open grid sized from the config.
    pub fn new(config: AppConfig) -> Result<Self, GridError> {
        let grid = config.build_grid()?;
        info!("Session grid is {}x{}", grid.rows(), grid.cols());
        Ok(Self::with_grid(config, grid))
    }

    /// Creates a session around an existing grid.
    pub fn with_grid(config: AppConfig, grid: Grid) -> Self {
        Self {
            overlay: vec![Overlay::None; grid.len()],
            config,
            grid,
            current_tool: None,
            job: Job::Idle,
            current: None,
            neighbors: Vec::new(),
            path: Vec::new(),
            status_message: "Pick a tool, then click the grid.".to_owned(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_tool(&self) -> Option<Tool> {
        self.current_tool
    }

    pub fn set_current_tool(&mut self, tool: Tool) {
        self.current_tool = Some(tool);
        self.status_message = format!("Selected tool: {}", tool.name());
    }

    /// True while a maze or search job is in progress. Edits are refused
    /// until it ends or is cancelled.
    pub fn is_busy(&self) -> bool {
        !matches!(self.job, Job::Idle)
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.job, Job::Generating(_))
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.job, Job::Searching(_))
    }

    /// Delay a front end should leave between two ticks of the running job.
    pub fn step_delay(&self) -> Option<Duration> {
        match self.job {
            Job::Idle => None,
            Job::Generating(_) => Some(self.config.maze_step_delay()),
            Job::Searching(_) => Some(self.config.search_step_delay()),
        }
    }

    pub fn overlay_at(&self, cell: Cell) -> Overlay {
        if self.grid.in_bounds(cell) {
            self.overlay[self.grid.index(cell)]
        } else {
            Overlay::None
        }
    }

    pub fn current(&self) -> Option<Cell> {
        self.current
    }

    pub fn neighbors(&self) -> &[Cell] {
        &self.neighbors
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    fn reset_overlay(&mut self) {
        self.overlay.iter_mut().for_each(|o| *o = Overlay::None);
        self.current = None;
        self.neighbors.clear();
        self.path.clear();
    }

    fn mark(&mut self, cell: Cell, overlay: Overlay) {
        let idx = self.grid.index(cell);
        self.overlay[idx] = overlay;
    }

    // --- Editing ---

    /// Applies the current tool to `cell`. Returns whether anything changed;
    /// refused edits (walls on markers, markers on walls, clicks while busy
    /// or without a tool) leave the session untouched.
    pub fn click(&mut self, cell: Cell) -> bool {
        if self.is_busy() {
            return false;
        }
        let Some(tool) = self.current_tool else {
            return false;
        };
        let applied = match tool {
            Tool::SetStart => self.grid.set_start(cell),
            Tool::SetEnd => self.grid.set_end(cell),
            Tool::Wall => self.grid.toggle_wall(cell),
        };
        if applied {
            self.reset_overlay();
        } else {
            debug!("{} refused at {}", tool.name(), cell);
        }
        applied
    }

    /// Opens the whole grid and resets the markers.
    pub fn clear(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.grid.clear();
        self.reset_overlay();
        self.status_message = "Grid cleared.".to_owned();
        true
    }

    /// Stops the running job where it is. A half-carved maze is kept and its
    /// markers are placed on the carved part, so they never sit on walls.
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.job, Job::Idle) {
            Job::Idle => {}
            Job::Generating(generator) => {
                let (start, end) = generator.finalize(&mut self.grid);
                info!("Maze cancelled; markers moved to {} and {}", start, end);
                self.status_message = format!("Cancelled. Partial maze: start {}, end {}", start, end);
            }
            Job::Searching(_) => {
                info!("Search cancelled");
                self.current = None;
                self.neighbors.clear();
                self.status_message = "Cancelled.".to_owned();
            }
        }
    }

    // --- Jobs ---

    fn maze_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Walls in the grid and starts carving a maze. Returns `Ok(false)` if
    /// another job is running.
    pub fn start_maze(&mut self) -> Result<bool, GridError> {
        if self.is_busy() {
            return Ok(false);
        }
        let rng = self.maze_rng();
        let generator = MazeGenerator::new(&mut self.grid, rng)?;
        self.reset_overlay();
        self.job = Job::Generating(generator);
        self.status_message = "Generating maze...".to_owned();
        Ok(true)
    }

    /// Starts an A* search between the current markers.
    pub fn start_search(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.reset_overlay();
        info!("Searching from {} to {}", self.grid.start(), self.grid.end());
        self.job = Job::Searching(AStar::new(&self.grid));
        self.status_message = "Searching...".to_owned();
        true
    }

    /// Advances the running job by one unit of work.
    pub fn tick(&mut self) -> SessionEvent {
        match std::mem::replace(&mut self.job, Job::Idle) {
            Job::Idle => SessionEvent::Idle,
            Job::Generating(mut generator) => match generator.step(&mut self.grid) {
                Some(step) => {
                    self.job = Job::Generating(generator);
                    SessionEvent::MazeStep(step)
                }
                None => {
                    let (start, end) = generator.finalize(&mut self.grid);
                    self.status_message = format!("Maze ready: start {}, end {}", start, end);
                    SessionEvent::MazeFinished { start, end }
                }
            },
            Job::Searching(mut search) => match search.step(&self.grid) {
                SearchStatus::Expanded(report) => {
                    self.apply_search_step(&report);
                    self.job = Job::Searching(search);
                    SessionEvent::SearchStep(report)
                }
                SearchStatus::Found(path) => {
                    self.current = None;
                    self.neighbors.clear();
                    for &cell in &path {
                        self.mark(cell, Overlay::Path);
                    }
                    self.path = path.clone();
                    self.status_message = format!(
                        "Path found: {} cells, {} expansions",
                        path.len(),
                        search.expansions()
                    );
                    info!("{}", self.status_message);
                    SessionEvent::PathFound(path)
                }
                SearchStatus::NoPath => {
                    self.current = None;
                    self.neighbors.clear();
                    self.status_message = "No path found!".to_owned();
                    info!("No path between {} and {}", self.grid.start(), self.grid.end());
                    SessionEvent::NoPath
                }
            },
        }
    }

    fn apply_search_step(&mut self, report: &StepReport) {
        for &cell in &report.discovered {
            self.mark(cell, Overlay::Frontier);
        }
        self.mark(report.closed(), Overlay::Visited);
        self.current = Some(report.current);
        self.neighbors = report.neighbors.clone();
    }

    /// Ticks until the running job finishes and returns its final event,
    /// or [`SessionEvent::Idle`] if nothing was running.
    pub fn run_to_completion(&mut self) -> SessionEvent {
        loop {
            let event = self.tick();
            if event.is_final() || event == SessionEvent::Idle {
                return event;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: usize, cols: usize, seed: Option<u64>) -> Session {
        let config = AppConfig { seed, ..AppConfig::default() };
        Session::with_grid(config, Grid::new(rows, cols).unwrap())
    }

    #[test]
    fn test_default_session() {
        let session = Session::new(AppConfig::default()).unwrap();
        assert_eq!(session.grid().rows(), 29);
        assert!(!session.is_busy());
        assert!(session.current_tool().is_none());
        assert!(session.step_delay().is_none());
    }

    #[test]
    fn test_click_without_tool_does_nothing() {
        let mut session = session(5, 5, None);
        assert!(!session.click(Cell::new(0, 0)));
        assert!(session.grid().is_open(Cell::new(0, 0)));
    }

    #[test]
    fn test_wall_tool_respects_markers() {
        let mut session = session(5, 5, None);
        session.set_current_tool(Tool::Wall);
        let start = session.grid().start();
        let before = session.grid().clone();
        assert!(!session.click(start));
        assert_eq!(session.grid(), &before);
        assert!(session.click(Cell::new(0, 0)));
        assert!(session.grid().is_wall(Cell::new(0, 0)));

        session.set_current_tool(Tool::SetStart);
        assert!(!session.click(Cell::new(0, 0)));
        assert!(session.click(Cell::new(4, 4)));
        assert_eq!(session.grid().start(), Cell::new(4, 4));
    }

    #[test]
    fn test_search_events_and_overlay() {
        let mut session = session(5, 5, None);
        assert!(session.start_search());
        assert!(session.is_searching());
        assert_eq!(session.step_delay(), Some(Duration::from_millis(50)));

        let first = session.tick();
        let SessionEvent::SearchStep(report) = first else {
            panic!("expected a search step, got {:?}", first);
        };
        assert_eq!(session.current(), Some(report.current));
        assert_eq!(session.overlay_at(report.current), Overlay::Visited);
        for cell in &report.discovered {
            assert_eq!(session.overlay_at(*cell), Overlay::Frontier);
        }

        let last = session.run_to_completion();
        let SessionEvent::PathFound(path) = last else {
            panic!("expected a path, got {:?}", last);
        };
        assert_eq!(path.len(), 5);
        assert_eq!(session.path(), path.as_slice());
        assert!(path.iter().all(|c| session.overlay_at(*c) == Overlay::Path));
        assert!(!session.is_busy());
        assert_eq!(session.tick(), SessionEvent::Idle);
    }

    #[test]
    fn test_no_path_message() {
        let mut session = session(5, 5, None);
        session.set_current_tool(Tool::Wall);
        for row in 0..5 {
            assert!(session.click(Cell::new(row, 2)));
        }
        session.start_search();
        assert_eq!(session.run_to_completion(), SessionEvent::NoPath);
        assert_eq!(session.status_message, "No path found!");
        assert!(session.path().is_empty());
    }

    #[test]
    fn test_busy_session_refuses_edits() {
        let mut session = session(9, 9, Some(1));
        session.set_current_tool(Tool::Wall);
        assert!(session.start_maze().unwrap());
        assert!(session.is_generating());
        assert!(!session.click(Cell::new(0, 0)));
        assert!(!session.clear());
        assert!(!session.start_search());
        assert_eq!(session.start_maze(), Ok(false));

        session.cancel();
        assert!(!session.is_busy());
        assert!(session.clear());
        assert_eq!(session.grid().open_cell_count(), 81);
    }

    #[test]
    fn test_cancelled_maze_keeps_markers_open() {
        let mut session = session(9, 9, Some(1));
        session.start_maze().unwrap();
        assert!(matches!(session.tick(), SessionEvent::MazeStep(_)));
        session.cancel();
        assert!(!session.is_busy());

        let (start, end) = (session.grid().start(), session.grid().end());
        assert!(!session.grid().is_wall(start), "start {} is walled", start);
        assert!(!session.grid().is_wall(end), "end {} is walled", end);

        // The partial maze stays usable.
        session.start_search();
        let SessionEvent::PathFound(path) = session.run_to_completion() else {
            panic!("partial maze markers must be connected");
        };
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
    }

    #[test]
    fn test_cancelled_search_clears_progress() {
        let mut session = session(5, 5, None);
        session.start_search();
        session.tick();
        assert!(session.current().is_some());
        session.cancel();
        assert!(!session.is_searching());
        assert!(session.current().is_none());
        assert!(session.neighbors().is_empty());
        assert_eq!(session.tick(), SessionEvent::Idle);
    }

    #[test]
    fn test_seeded_maze_then_search() {
        let mut a = session(15, 15, Some(42));
        let mut b = session(15, 15, Some(42));
        a.start_maze().unwrap();
        b.start_maze().unwrap();
        let end_a = a.run_to_completion();
        let end_b = b.run_to_completion();
        assert!(matches!(end_a, SessionEvent::MazeFinished { .. }));
        assert_eq!(end_a, end_b);
        assert_eq!(a.grid(), b.grid());

        a.start_search();
        let SessionEvent::PathFound(path) = a.run_to_completion() else {
            panic!("generated maze must be solvable");
        };
        assert_eq!(path.first(), Some(&a.grid().start()));
        assert_eq!(path.last(), Some(&a.grid().end()));
    }

    #[test]
    fn test_maze_too_small() {
        let mut session = session(2, 9, None);
        assert!(session.start_maze().is_err());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_tool_names() {
        let names: Vec<&str> = Tool::all().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Set Start", "Set End", "Set Wall"]);
    }
}
