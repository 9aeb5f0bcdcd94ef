use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::board::{Board, Clue, RandomSource, RawClueList, normalize};
use crate::config::BoardDimensions;
use crate::session::reset::{Pagination, ResetFlow};
use crate::session::selection::Selection;

/// A fetch the shell must run on the session's behalf. Results are handed
/// back with the same `generation` so superseded loads can be dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub offset: u32,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayState {
    board: Board,
    visited: HashSet<i64>,
    selection: Selection,
}

impl PlayState {
    fn new(board: Board) -> Self {
        Self {
            board,
            visited: HashSet::new(),
            selection: Selection::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn visited(&self) -> &HashSet<i64> {
        &self.visited
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No grid exists while loading. `failed` is set once the pending load
    /// has errored and nothing newer is in flight.
    Loading { failed: bool },
    Ready(PlayState),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSession {
    dims: BoardDimensions,
    pagination: Pagination,
    generation: u64,
    reset: ResetFlow,
    phase: Phase,
}

impl BoardSession {
    pub fn new(dims: BoardDimensions, start_offset: u32) -> (Self, LoadRequest) {
        let session = Self {
            dims,
            pagination: Pagination::new(start_offset, dims.categories_num()),
            generation: 1,
            reset: ResetFlow::Normal,
            phase: Phase::Loading { failed: false },
        };
        let request = session.load_request();
        (session, request)
    }

    fn load_request(&self) -> LoadRequest {
        LoadRequest {
            generation: self.generation,
            offset: self.pagination.offset(),
            count: self.dims.categories_num(),
        }
    }

    fn map_play(self, f: impl FnOnce(PlayState) -> PlayState) -> Self {
        match self.phase {
            Phase::Ready(play) => Self {
                phase: Phase::Ready(f(play)),
                ..self
            },
            Phase::Loading { .. } => self,
        }
    }

    // Selection

    /// Open a clue and mark it visited. Ids not on the board still open an
    /// (empty) detail view.
    pub fn select_clue(self, clue_id: i64) -> Self {
        self.map_play(|mut play| {
            if play.board.find(clue_id).is_none() {
                debug!(clue_id, "selected clue is not on the board");
            }
            play.visited.insert(clue_id);
            PlayState {
                selection: play.selection.select(clue_id),
                ..play
            }
        })
    }

    pub fn toggle_reveal(self) -> Self {
        self.map_play(|play| PlayState {
            selection: play.selection.toggle_reveal(),
            ..play
        })
    }

    pub fn close_clue(self) -> Self {
        self.map_play(|play| PlayState {
            selection: play.selection.close(),
            ..play
        })
    }

    // Reset and pagination

    pub fn request_reset(self) -> Self {
        Self {
            reset: self.reset.request(),
            ..self
        }
    }

    pub fn cancel_reset(self) -> Self {
        Self {
            reset: self.reset.cancel(),
            ..self
        }
    }

    /// Advance to the next page and drop the current board. Returns the load
    /// to dispatch, or `None` when no confirmation was pending.
    pub fn confirm_reset(self) -> (Self, Option<LoadRequest>) {
        if !self.reset.is_confirming() {
            return (self, None);
        }
        let next = Self {
            pagination: self.pagination.advance(),
            generation: self.generation + 1,
            reset: ResetFlow::Normal,
            phase: Phase::Loading { failed: false },
            ..self
        };
        let request = next.load_request();
        info!(
            offset = request.offset,
            generation = request.generation,
            "board reset confirmed"
        );
        (next, Some(request))
    }

    /// Re-issue the current window after a failed load. The offset is kept.
    pub fn retry_load(self) -> (Self, Option<LoadRequest>) {
        if !matches!(self.phase, Phase::Loading { failed: true }) {
            return (self, None);
        }
        let next = Self {
            generation: self.generation + 1,
            phase: Phase::Loading { failed: false },
            ..self
        };
        let request = next.load_request();
        (next, Some(request))
    }

    // Load completion

    pub fn apply_loaded(self, generation: u64, board: Board) -> Self {
        if generation != self.generation {
            warn!(
                generation,
                current = self.generation,
                "discarding stale board"
            );
            return self;
        }
        info!(
            generation,
            columns = board.columns().len(),
            "board ready"
        );
        Self {
            phase: Phase::Ready(PlayState::new(board)),
            ..self
        }
    }

    /// Normalize freshly fetched lists and install the board. Stale results
    /// are dropped before any random draws are taken.
    pub fn apply_fetched(
        self,
        generation: u64,
        raw: Vec<RawClueList>,
        rng: &mut impl RandomSource,
    ) -> Self {
        if generation != self.generation {
            return self.apply_loaded(generation, Board::default());
        }
        let board = normalize(raw, self.dims, rng);
        self.apply_loaded(generation, board)
    }

    pub fn load_failed(self, generation: u64) -> Self {
        if generation != self.generation || !self.is_loading() {
            return self;
        }
        Self {
            phase: Phase::Loading { failed: true },
            ..self
        }
    }

    // Accessors

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn load_has_failed(&self) -> bool {
        matches!(self.phase, Phase::Loading { failed: true })
    }

    pub fn play(&self) -> Option<&PlayState> {
        match &self.phase {
            Phase::Ready(play) => Some(play),
            Phase::Loading { .. } => None,
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.play().map(PlayState::board)
    }

    pub fn is_visited(&self, clue_id: i64) -> bool {
        self.play().is_some_and(|p| p.visited.contains(&clue_id))
    }

    pub fn selection(&self) -> Selection {
        self.play().map(PlayState::selection).unwrap_or_default()
    }

    /// The open clue, if its id is on the board.
    pub fn selected_clue(&self) -> Option<&Clue> {
        let play = self.play()?;
        play.board.find(play.selection.clue_id()?)
    }

    pub fn reset_flow(&self) -> ResetFlow {
        self.reset
    }

    pub fn offset(&self) -> u32 {
        self.pagination.offset()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dims(&self) -> BoardDimensions {
        self.dims
    }
}
