use std::sync::Arc;
use std::sync::mpsc::Sender;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::board::{Board, RawClueList};
use crate::config::Config;
use crate::event::AppEvent;
use crate::fetch::{self, CategorySource, FetchError};
use crate::session::{BoardSession, LoadRequest};
use crate::ui::components::board_grid::GridCursor;
use crate::ui::theme::Theme;

pub struct App {
    pub session: BoardSession,
    pub cursor: GridCursor,
    pub theme: &'static Theme,
    pub last_error: Option<String>,
    pub should_quit: bool,
    source: Arc<dyn CategorySource>,
    events: Sender<AppEvent>,
    rng: SmallRng,
}

impl App {
    /// Build the app and start loading the first page.
    pub fn new(
        config: &Config,
        theme: &'static Theme,
        source: Arc<dyn CategorySource>,
        events: Sender<AppEvent>,
    ) -> anyhow::Result<Self> {
        let dims = config.dimensions()?;
        let (session, request) = BoardSession::new(dims, config.start_offset);
        let app = Self {
            session,
            cursor: GridCursor::default(),
            theme,
            last_error: None,
            should_quit: false,
            source,
            events,
            rng: SmallRng::from_entropy(),
        };
        app.dispatch(request);
        Ok(app)
    }

    fn dispatch(&self, request: LoadRequest) {
        info!(
            offset = request.offset,
            count = request.count,
            generation = request.generation,
            "loading board"
        );
        let tx = self.events.clone();
        let generation = request.generation;
        fetch::spawn_fetch(
            Arc::clone(&self.source),
            request.offset,
            request.count,
            move |result| {
                // The receiver is gone once the app has quit.
                let _ = tx.send(AppEvent::BoardFetched { generation, result });
            },
        );
    }

    fn update(&mut self, f: impl FnOnce(BoardSession) -> BoardSession) {
        self.session = f(self.session.clone());
    }

    fn update_with_request(
        &mut self,
        f: impl FnOnce(BoardSession) -> (BoardSession, Option<LoadRequest>),
    ) {
        let (session, request) = f(self.session.clone());
        self.session = session;
        if let Some(request) = request {
            self.last_error = None;
            self.cursor = GridCursor::default();
            self.dispatch(request);
        }
    }

    pub fn on_board_fetched(
        &mut self,
        generation: u64,
        result: Result<Vec<RawClueList>, FetchError>,
    ) {
        match result {
            Ok(raw) => {
                self.session = self
                    .session
                    .clone()
                    .apply_fetched(generation, raw, &mut self.rng);
                if let Some(board) = self.session.board() {
                    self.cursor = self.cursor.clamped(board);
                }
            }
            Err(err) => {
                if generation == self.session.generation() {
                    warn!(generation, error = %err, "board load failed");
                    self.last_error = Some(err.to_string());
                } else {
                    warn!(generation, error = %err, "stale board load failed");
                }
                self.update(|s| s.load_failed(generation));
            }
        }
    }

    pub fn open_clue_at_cursor(&mut self) {
        let clue_id = self
            .session
            .board()
            .and_then(|b| b.clue_at(self.cursor.column, self.cursor.row))
            .map(|c| c.id);
        if let Some(id) = clue_id {
            self.update(|s| s.select_clue(id));
        }
    }

    pub fn toggle_reveal(&mut self) {
        self.update(BoardSession::toggle_reveal);
    }

    pub fn close_clue(&mut self) {
        self.update(BoardSession::close_clue);
    }

    pub fn request_reset(&mut self) {
        self.update(BoardSession::request_reset);
    }

    pub fn cancel_reset(&mut self) {
        self.update(BoardSession::cancel_reset);
    }

    pub fn confirm_reset(&mut self) {
        self.update_with_request(BoardSession::confirm_reset);
    }

    pub fn retry_load(&mut self) {
        self.update_with_request(BoardSession::retry_load);
    }

    pub fn move_cursor(&mut self, step: fn(GridCursor, &Board) -> GridCursor) {
        if let Some(board) = self.session.board() {
            self.cursor = step(self.cursor, board);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::board::{CategoryRef, Clue};

    struct FixedSource;

    impl CategorySource for FixedSource {
        fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError> {
            if category >= 100 {
                return Err(FetchError::Status {
                    category,
                    status: 503,
                });
            }
            Ok((0..5)
                .map(|i| Clue {
                    id: i64::from(category) * 10 + i,
                    question: format!("q{category}-{i}"),
                    answer: format!("a{category}-{i}"),
                    value: Some((i + 1) * 200),
                    category: CategoryRef {
                        title: format!("category {category}"),
                    },
                    daily_double: false,
                })
                .collect())
        }
    }

    fn test_app(start_offset: u32) -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let config = Config {
            start_offset,
            ..Config::default()
        };
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let app = App::new(&config, theme, Arc::new(FixedSource), tx).unwrap();
        (app, rx)
    }

    fn pump(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::BoardFetched { generation, result } => app.on_board_fetched(generation, result),
            _ => panic!("expected a fetch result"),
        }
    }

    #[test]
    fn test_first_load_fills_board() {
        let (mut app, rx) = test_app(0);
        assert!(app.session.is_loading());
        pump(&mut app, &rx);
        let board = app.session.board().unwrap();
        assert_eq!(board.columns().len(), 6);
        assert_eq!(board.columns()[0].title, "category 0");
    }

    #[test]
    fn test_open_clue_at_cursor_marks_visited() {
        let (mut app, rx) = test_app(0);
        pump(&mut app, &rx);
        app.move_cursor(GridCursor::right);
        app.move_cursor(GridCursor::down);
        app.open_clue_at_cursor();
        assert_eq!(app.session.selection().clue_id(), Some(11));
        app.close_clue();
        assert!(app.session.is_visited(11));
    }

    #[test]
    fn test_confirmed_reset_loads_next_page() {
        let (mut app, rx) = test_app(0);
        pump(&mut app, &rx);
        app.request_reset();
        app.confirm_reset();
        assert!(app.session.is_loading());
        assert_eq!(app.session.offset(), 6);
        pump(&mut app, &rx);
        assert_eq!(app.session.board().unwrap().columns()[0].title, "category 6");
    }

    #[test]
    fn test_failed_load_records_error_and_retries() {
        let (mut app, rx) = test_app(100);
        pump(&mut app, &rx);
        assert!(app.session.load_has_failed());
        assert!(app.last_error.as_deref().unwrap().contains("503"));

        app.retry_load();
        assert!(app.last_error.is_none());
        assert_eq!(app.session.offset(), 100);
        pump(&mut app, &rx);
        assert!(app.session.load_has_failed());
    }
}
