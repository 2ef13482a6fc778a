//! Application state, kept separate from rendering so transitions can be
//! tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::loader::{LoadState, PaletteLoader};
use crate::catalog::{Palette, PaletteEntry};
use crate::color::Color;
use crate::matcher::find_closest;
use crate::query::{parse_query, InvalidColor, Query};
use crate::tui::input::{InputOutcome, QueryInput};

const PAGE: usize = 10;

/// What the last submitted query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// No active search: the whole palette is listed.
    Empty,
    Valid {
        text: String,
        color: Color,
    },
    Invalid(InvalidColor),
}

/// One table row: a palette entry, with its distance when a search is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub entry: &'a PaletteEntry,
    pub similarity: Option<f64>,
}

pub struct App {
    pub loader: PaletteLoader,
    pub input: QueryInput,
    pub search: SearchState,
    pub limit: usize,
    pub scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(loader: PaletteLoader, limit: usize) -> Self {
        Self {
            loader,
            input: QueryInput::new("Colour: "),
            search: SearchState::Empty,
            limit,
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    /// Searching is blocked until a palette load has succeeded.
    pub fn can_search(&self) -> bool {
        !matches!(self.load_state(), LoadState::Failed(_))
    }

    /// Start the initial load, a retry, or a manual refresh.
    pub fn reload(&mut self) {
        if self.loader.start() {
            self.scroll = 0;
        }
    }

    /// Pick up a finished load. Returns `true` if anything changed.
    pub fn tick(&mut self) -> bool {
        self.loader.poll()
    }

    /// Parse the input box and update the active search.
    pub fn submit(&mut self) {
        let text = self.input.content().to_string();
        self.search_text(&text);
    }

    /// Update the active search from `text`.
    pub fn search_text(&mut self, text: &str) {
        if !self.can_search() {
            log::debug!("search ignored while palette is unavailable");
            return;
        }

        let text = text.to_string();
        self.search = match parse_query(&text) {
            Ok(Query::Empty) => SearchState::Empty,
            Ok(Query::Color(color)) => {
                log::info!("searching for {color} ({text:?})");
                SearchState::Valid { text, color }
            }
            Err(e) => {
                log::info!("invalid query {:?}", e.input);
                SearchState::Invalid(e)
            }
        };
        self.scroll = 0;
    }

    /// Live preview of the color being typed, if it parses.
    pub fn preview(&self) -> Option<Color> {
        match parse_query(self.input.content()) {
            Ok(Query::Color(color)) => Some(color),
            _ => None,
        }
    }

    /// Rows to show for `palette`: every entry when no search is active, the
    /// ranked matches for a valid search, nothing otherwise.
    pub fn rows<'p>(&self, palette: &'p Palette) -> Vec<Row<'p>> {
        if !self.can_search() {
            return Vec::new();
        }
        match &self.search {
            SearchState::Empty => palette
                .entries()
                .iter()
                .map(|entry| Row {
                    entry,
                    similarity: None,
                })
                .collect(),
            SearchState::Valid { color, .. } => find_closest(*color, palette, self.limit)
                .into_iter()
                .map(|r| Row {
                    entry: r.entry,
                    similarity: Some(r.similarity),
                })
                .collect(),
            SearchState::Invalid(_) => Vec::new(),
        }
    }

    /// Line shown above the table.
    pub fn caption(&self) -> String {
        match &self.search {
            SearchState::Valid { text, .. } => format!("Searched for ' {} '", text.trim()),
            _ => "All colours.".to_string(),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.reload(),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll += 1,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll += PAGE,
            _ => {
                if let InputOutcome::Submit = self.input.handle_key_event(key) {
                    self.submit();
                }
            }
        }
    }

    /// Keep the scroll offset inside the current row count.
    pub fn clamp_scroll(&mut self, rows: usize, visible: usize) {
        let max = rows.saturating_sub(visible.max(1));
        self.scroll = self.scroll.min(max);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::catalog::source::{PaletteSource, RawColor};
    use crate::error::{FetchError, Result};

    struct TestSource {
        fail: AtomicBool,
    }

    impl PaletteSource for TestSource {
        fn fetch(&self) -> Result<Vec<RawColor>> {
            if self.fail.swap(false, Ordering::SeqCst) {
                return Err(FetchError::Status {
                    status: 500,
                    url: "test://colors".into(),
                });
            }
            let colors = [
                ("red", "#ff0000"),
                ("black", "#000000"),
                ("blue", "#0000ff"),
            ];
            Ok(colors
                .iter()
                .map(|(color, hex)| RawColor {
                    color: color.to_string(),
                    hex: hex.to_string(),
                })
                .collect())
        }

        fn describe(&self) -> String {
            "test://colors".into()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn loaded_app(fail_first: bool) -> App {
        let loader = PaletteLoader::new(Box::new(TestSource {
            fail: AtomicBool::new(fail_first),
        }));
        let mut app = App::new(loader, 100);
        app.reload();
        app.loader.wait();
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn row_names(app: &App) -> Vec<String> {
        let palette = app.loader.palette();
        app.rows(&palette)
            .iter()
            .map(|r| r.entry.name.clone())
            .collect()
    }

    #[test]
    fn empty_search_lists_whole_palette() {
        let app = loaded_app(false);
        assert_eq!(app.search, SearchState::Empty);
        assert_eq!(row_names(&app), ["red", "black", "blue"]);
        assert_eq!(app.caption(), "All colours.");
    }

    #[test]
    fn enter_runs_search() {
        let mut app = loaded_app(false);
        type_text(&mut app, "#fe0000");
        app.handle_key_event(key(KeyCode::Enter));

        assert!(matches!(app.search, SearchState::Valid { .. }));
        assert_eq!(row_names(&app), ["red", "black", "blue"]);
        assert_eq!(app.caption(), "Searched for ' #fe0000 '");

        let palette = app.loader.palette();
        let rows = app.rows(&palette);
        assert!(rows.iter().all(|r| r.similarity.is_some()));
    }

    #[test]
    fn rgb_search_finds_exact_black() {
        let mut app = loaded_app(false);
        type_text(&mut app, "0,0,0");
        app.submit();
        let palette = app.loader.palette();
        let rows = app.rows(&palette);
        assert_eq!(rows[0].entry.name, "black");
        assert_eq!(rows[0].similarity, Some(0.0));
    }

    #[test]
    fn invalid_search_shows_error_and_no_rows() {
        let mut app = loaded_app(false);
        type_text(&mut app, "not-a-color");
        app.submit();
        assert!(matches!(app.search, SearchState::Invalid(_)));
        assert!(row_names(&app).is_empty());
        // Palette is unaffected.
        assert_eq!(app.loader.palette().len(), 3);
    }

    #[test]
    fn clearing_input_reverts_to_full_listing() {
        let mut app = loaded_app(false);
        type_text(&mut app, "#000");
        app.submit();
        app.handle_key_event(ctrl_key('u'));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.search, SearchState::Empty);
        assert_eq!(row_names(&app).len(), 3);
    }

    #[test]
    fn limit_truncates_matches() {
        let mut app = loaded_app(false);
        app.limit = 2;
        type_text(&mut app, "#ff0000");
        app.submit();
        assert_eq!(row_names(&app), ["red", "black"]);
    }

    #[test]
    fn failed_load_blocks_search_until_retry() {
        let mut app = loaded_app(true);
        assert!(matches!(app.load_state(), LoadState::Failed(_)));
        assert!(!app.can_search());

        type_text(&mut app, "#ff0000");
        app.submit();
        assert_eq!(app.search, SearchState::Empty);
        assert!(row_names(&app).is_empty());

        app.handle_key_event(ctrl_key('r'));
        app.loader.wait();
        assert_eq!(app.load_state(), &LoadState::Ready);

        app.submit();
        let mut fresh = loaded_app(false);
        type_text(&mut fresh, "#ff0000");
        fresh.submit();
        assert_eq!(row_names(&app), row_names(&fresh));
    }

    #[test]
    fn preview_follows_typed_text() {
        let mut app = loaded_app(false);
        assert_eq!(app.preview(), None);
        type_text(&mut app, "#0f0");
        assert_eq!(app.preview(), Some(Color::new(0, 255, 0)));
        type_text(&mut app, "x");
        assert_eq!(app.preview(), None);
    }

    #[test]
    fn quit_keys() {
        let mut app = loaded_app(false);
        app.handle_key_event(ctrl_key('c'));
        assert!(app.should_quit);

        let mut app = loaded_app(false);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut app = loaded_app(false);
        app.handle_key_event(key(KeyCode::PageDown));
        assert_eq!(app.scroll, PAGE);
        app.clamp_scroll(3, 2);
        assert_eq!(app.scroll, 1);
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.scroll, 0);
    }
}
