mod app;
mod board;
mod config;
mod event;
mod fetch;
mod logging;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use fetch::{CategorySource, DirectorySource, HttpSource};
use session::Phase;
use ui::components::board_grid::{BoardGrid, GridCursor};
use ui::components::clue_details::ClueDetails;
use ui::components::loader::Loader;
use ui::components::reset_confirmation::ResetConfirmation;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "trivia-board", version, about = "Terminal trivia board backed by a remote clue API")]
struct Cli {
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..), help = "Number of category columns")]
    categories: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), help = "Number of clues per category")]
    clues: Option<u32>,

    #[arg(short, long, help = "Clue API endpoint, queried with ?category=<n>")]
    source: Option<String>,

    #[arg(long, conflicts_with = "source", help = "Directory of <category>.json files to read instead of the API")]
    source_dir: Option<PathBuf>,

    #[arg(short, long, help = "First category id to load")]
    offset: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Log debug events")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_file = logging::init(cli.verbose);

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "config unreadable, using defaults");
        Config::default()
    });
    if let Some(categories) = cli.categories {
        config.categories_num = categories;
    }
    if let Some(clues) = cli.clues {
        config.clues_num = clues;
    }
    if let Some(source) = cli.source {
        config.clue_source = source;
    }
    if let Some(offset) = cli.offset {
        config.start_offset = offset;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));

    let source: Arc<dyn CategorySource> = match cli.source_dir {
        Some(dir) => Arc::new(DirectorySource::new(dir)),
        None => Arc::new(HttpSource::new(
            config.clue_source.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?),
    };
    info!(log = ?log_file, source = %config.clue_source, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let result = App::new(&config, theme, source, events.sender())
        .and_then(|mut app| run_app(&mut terminal, &mut app, &events));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::BoardFetched { generation, result } => {
                app.on_board_fetched(generation, result)
            }
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Confirmation dialog takes priority
    if app.session.reset_flow().is_confirming() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        }
        return;
    }

    if app.session.is_loading() {
        handle_loading_key(app, key);
    } else if app.session.selection().is_open() {
        handle_details_key(app, key);
    } else {
        handle_board_key(app, key);
    }
}

fn handle_loading_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('R') => app.retry_load(),
        KeyCode::Char('r') => app.request_reset(),
        _ => {}
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(GridCursor::left),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(GridCursor::right),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(GridCursor::up),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(GridCursor::down),
        KeyCode::Enter => app.open_clue_at_cursor(),
        KeyCode::Char('r') => app.request_reset(),
        _ => {}
    }
}

fn handle_details_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('a') => app.toggle_reveal(),
        KeyCode::Esc | KeyCode::Char('d') | KeyCode::Backspace => app.close_clue(),
        KeyCode::Char('r') => app.request_reset(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints: &[&str] = match app.session.phase() {
        Phase::Loading { failed: true } => &["[R] Retry", "[r] Reset", "[q] Quit"],
        Phase::Loading { failed: false } => &["[q] Quit"],
        Phase::Ready(play) if play.selection().is_open() => {
            &["[Space] Show answer/question", "[Esc] Done"]
        }
        Phase::Ready(_) => &["[arrows/hjkl] Move", "[Enter] Open", "[r] Reset", "[q] Quit"],
    };
    let hint_lines = pack_hint_lines(hints, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);
    let dims = app.session.dims();

    let header_info = format!(
        " categories {}-{} | {}x{} ",
        app.session.offset(),
        app.session
            .offset()
            .saturating_add(dims.categories_num().saturating_sub(1)),
        dims.categories_num(),
        dims.clues_num(),
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " trivia-board ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let footer = Paragraph::new(
        hint_lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, layout.footer);

    match app.session.phase() {
        Phase::Loading { failed } => {
            let error = app.last_error.as_deref().filter(|_| *failed);
            frame.render_widget(Loader::new(error, app.theme), layout.main);
        }
        Phase::Ready(play) => {
            let grid = BoardGrid::new(play, app.cursor, layout.tier, app.theme);
            frame.render_widget(grid, layout.main);

            if let Some(reveal) = play.selection().reveal() {
                let popup = centered_rect(80, 80, layout.main);
                let details = ClueDetails::new(app.session.selected_clue(), reveal, app.theme);
                frame.render_widget(details, popup);
            }
        }
    }

    if app.session.reset_flow().is_confirming() {
        let popup = centered_rect(50, 40, area);
        let next_offset = app
            .session
            .offset()
            .saturating_add(dims.categories_num());
        frame.render_widget(ResetConfirmation::new(next_offset, app.theme), popup);
    }
}
