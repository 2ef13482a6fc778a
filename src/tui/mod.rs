pub mod input;
pub mod widgets;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::Terminal;

use crate::app::{App, SearchState};
use crate::catalog::loader::LoadState;
use widgets::{BannerWidget, KeyHintsWidget, ResultsWidget};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Launch the TUI application. Kicks off the palette load and runs the event
/// loop until the user quits.
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    app.reload();

    let result = event_loop(&mut terminal, &mut app);

    // Restore even if the loop failed, then report the first error.
    let restored = restore_terminal(&mut terminal);
    log::info!("shutting down");
    result.and(restored)
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    log::debug!("key={:?} modifiers={:?}", key.code, key.modifiers);
                    app.handle_key_event(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

const HINTS: [(&str, &str); 4] = [
    ("Enter", "search"),
    ("↑/↓", "scroll"),
    ("^R", "reload"),
    ("Esc", "quit"),
];

fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if let LoadState::Failed(message) = app.load_state() {
        let banner = BannerWidget::error(
            "Failed to load colours",
            vec![
                message.clone(),
                format!("Source: {}", app.loader.source_description()),
                String::new(),
                "Press Ctrl-R to retry or Esc to quit.".to_string(),
            ],
        );
        frame.render_widget(banner, area);
        return;
    }

    let [header, input, _, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Line::styled(
            " Colour search",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        header,
    );
    frame.render_widget(app.input.widget(app.preview()), input);
    frame.render_widget(KeyHintsWidget::new(&HINTS), footer);

    if let SearchState::Invalid(err) = &app.search {
        frame.render_widget(BannerWidget::error("Error", vec![err.to_string()]), body);
        return;
    }

    if app.load_state() == &LoadState::Loading {
        frame.render_widget(
            BannerWidget::info("Colours", vec!["Loading...".to_string()]),
            body,
        );
        return;
    }

    let palette = app.loader.palette();
    let caption = app.caption();
    let rows = app.rows(&palette);
    // Caption and column header take two lines.
    app.clamp_scroll(rows.len(), (body.height as usize).saturating_sub(2));
    frame.render_widget(ResultsWidget::new(&rows, &caption, app.scroll), body);
}
