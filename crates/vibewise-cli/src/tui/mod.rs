use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use vibewise_core::{Catalog, EnrichedTrack};
use vibewise_search::DEFAULT_TOP_K;

use crate::engine::Engine;

pub mod set_vibe;
pub mod song;

/// Which screen the app is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The search screen: query input, suggestions, result grid.
    SetVibe,
    /// The playback screen for the selected video.
    Song,
}

/// The one IO action a key press can trigger; everything else is a pure
/// state transition handled inside [`App::handle_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Recommend { query: String },
}

/// Session state, owned by the interaction loop.
///
/// This is the whole memory of one interactive session: the active screen,
/// the last result set, and the video chosen for playback. Results and the
/// selected link deliberately survive the back-to-search transition.
#[derive(Debug)]
pub struct App {
    pub view: View,
    pub input: String,
    pub suggestions: Vec<String>,
    pub suggestion_idx: Option<usize>,
    pub results: Vec<EnrichedTrack>,
    pub selected: usize,
    pub video_link: Option<String>,
    pub warning: Option<String>,
    pub status: Option<String>,
    pub should_quit: bool,
    catalog: Arc<Catalog>,
}

impl App {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            view: View::SetVibe,
            input: String::new(),
            suggestions: Vec::new(),
            suggestion_idx: None,
            results: Vec::new(),
            selected: 0,
            video_link: None,
            warning: None,
            status: None,
            should_quit: false,
            catalog,
        }
    }

    /// Handle one key press. Pure transitions mutate the state directly;
    /// the recommend action is returned for the event loop to execute.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        match self.view {
            View::SetVibe => self.handle_set_vibe_key(key),
            View::Song => {
                self.handle_song_key(key);
                None
            }
        }
    }

    fn handle_set_vibe_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('w') => self.watch_selected(),
                KeyCode::Char('s') => self.request_song_view(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                self.input.push(c);
                self.refresh_suggestions();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.refresh_suggestions();
            }
            KeyCode::Tab => self.cycle_suggestion(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => return self.request_recommend(),
            _ => {}
        }
        None
    }

    fn handle_song_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                // Results and the selected link persist for the next visit.
                self.view = View::SetVibe;
            }
            _ => {}
        }
    }

    /// The query the Recommend action will use: the highlighted suggestion
    /// when one is active, the raw input otherwise.
    #[must_use]
    pub fn active_query(&self) -> String {
        self.suggestion_idx
            .and_then(|i| self.suggestions.get(i))
            .cloned()
            .unwrap_or_else(|| self.input.clone())
    }

    fn request_recommend(&mut self) -> Option<UiCommand> {
        let query = self.active_query();
        if query.trim().is_empty() {
            self.warning = Some("Type a song or artist first.".to_string());
            return None;
        }
        Some(UiCommand::Recommend { query })
    }

    /// Pick the highlighted result for playback and switch to the Song
    /// screen. The link may be absent; the Song screen warns in that case.
    fn watch_selected(&mut self) {
        let Some(result) = self.results.get(self.selected) else {
            return;
        };
        self.video_link = result.link.clone();
        self.warning = None;
        self.view = View::Song;
    }

    /// Sidebar-style "Song" request: only valid once a video was selected.
    fn request_song_view(&mut self) {
        if self.video_link.is_some() {
            self.warning = None;
            self.view = View::Song;
        } else {
            self.warning = Some("No video selected!".to_string());
        }
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self.catalog.suggest(&self.input);
        self.suggestion_idx = None;
        self.warning = None;
    }

    /// Tab cycles: free input -> first suggestion -> ... -> last -> free.
    fn cycle_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            self.suggestion_idx = None;
            return;
        }
        self.suggestion_idx = match self.suggestion_idx {
            None => Some(0),
            Some(i) if i + 1 < self.suggestions.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    /// Install a freshly enriched result set.
    pub fn apply_results(&mut self, results: Vec<EnrichedTrack>) {
        self.results = results;
        self.selected = 0;
        self.warning = None;
    }

    pub fn set_warning(&mut self, warning: impl Into<String>) {
        self.warning = Some(warning.into());
    }
}

/// Run the interactive TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the
/// terminal on exit (including on error).
pub fn run_tui(engine: &Engine, handle: &Handle) -> Result<()> {
    let app = App::new(Arc::clone(&engine.catalog));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app, engine, handle);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    engine: &Engine,
    handle: &Handle,
) -> Result<()> {
    loop {
        draw(terminal, &app)?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(command) = app.handle_key(key) {
                    run_command(terminal, &mut app, engine, handle, command)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &App) -> Result<()> {
    terminal.draw(|frame| match app.view {
        View::SetVibe => set_vibe::render(frame, app),
        View::Song => song::render(frame, app),
    })?;
    Ok(())
}

/// Execute the one IO command: a full recommend + enrich cycle.
///
/// The interaction blocks here until the whole batch has joined; a status
/// line is drawn first so the user sees why the UI is holding still.
fn run_command(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    engine: &Engine,
    handle: &Handle,
    command: UiCommand,
) -> Result<()> {
    match command {
        UiCommand::Recommend { query } => {
            app.status = Some("Setting the vibe...".to_string());
            draw(terminal, app)?;

            let outcome = handle.block_on(engine.recommend_enriched(&query, DEFAULT_TOP_K));
            app.status = None;

            match outcome {
                Ok(results) => app.apply_results(results),
                Err(e) => {
                    log::warn!("Recommendation failed: {e:#}");
                    app.set_warning(format!("Recommendation failed: {e}"));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibewise_core::TrackRecord;

    fn test_app() -> App {
        let catalog = Arc::new(Catalog::from_records(vec![
            TrackRecord::new("Bohemian Rhapsody", "Queen", "is this the real life"),
            TrackRecord::new("Bohemian Like You", "The Dandy Warhols", "you got a great car"),
        ]));
        App::new(catalog)
    }

    fn enriched(song: &str, link: Option<&str>) -> EnrichedTrack {
        EnrichedTrack {
            song: song.to_string(),
            artist: "Artist".to_string(),
            text: "text".to_string(),
            cover: None,
            link: link.map(str::to_string),
        }
    }

    fn press(app: &mut App, code: KeyCode) -> Option<UiCommand> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_ctrl(app: &mut App, c: char) -> Option<UiCommand> {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_initial_state() {
        let app = test_app();
        assert_eq!(app.view, View::SetVibe);
        assert!(app.results.is_empty());
        assert!(app.video_link.is_none());
    }

    #[test]
    fn test_song_request_without_link_stays_and_warns() {
        let mut app = test_app();
        press_ctrl(&mut app, 's');

        assert_eq!(app.view, View::SetVibe);
        assert_eq!(app.warning.as_deref(), Some("No video selected!"));
    }

    #[test]
    fn test_song_request_with_link_transitions() {
        let mut app = test_app();
        app.video_link = Some("http://x".to_string());
        press_ctrl(&mut app, 's');

        assert_eq!(app.view, View::Song);
        assert!(app.warning.is_none());
    }

    #[test]
    fn test_watch_sets_exact_link_and_enters_song() {
        let mut app = test_app();
        app.apply_results(vec![
            enriched("A", Some("https://watch/a")),
            enriched("B", Some("https://watch/b")),
        ]);
        press(&mut app, KeyCode::Down);
        press_ctrl(&mut app, 'w');

        assert_eq!(app.view, View::Song);
        assert_eq!(app.video_link.as_deref(), Some("https://watch/b"));
    }

    #[test]
    fn test_watch_with_absent_link_still_enters_song() {
        let mut app = test_app();
        app.apply_results(vec![enriched("A", None)]);
        press_ctrl(&mut app, 'w');

        assert_eq!(app.view, View::Song);
        assert!(app.video_link.is_none());
    }

    #[test]
    fn test_watch_with_no_results_is_a_no_op() {
        let mut app = test_app();
        press_ctrl(&mut app, 'w');

        assert_eq!(app.view, View::SetVibe);
        assert!(app.video_link.is_none());
    }

    #[test]
    fn test_back_from_song_preserves_session() {
        let mut app = test_app();
        app.apply_results(vec![enriched("A", Some("https://watch/a"))]);
        press_ctrl(&mut app, 'w');
        assert_eq!(app.view, View::Song);

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.view, View::SetVibe);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.video_link.as_deref(), Some("https://watch/a"));
    }

    #[test]
    fn test_empty_query_is_rejected_with_warning() {
        let mut app = test_app();
        let command = press(&mut app, KeyCode::Enter);

        assert!(command.is_none());
        assert!(app.warning.is_some());
        assert_eq!(app.view, View::SetVibe);
    }

    #[test]
    fn test_recommend_command_uses_raw_input() {
        let mut app = test_app();
        for c in "disco".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        let command = press(&mut app, KeyCode::Enter);

        assert_eq!(
            command,
            Some(UiCommand::Recommend {
                query: "disco".to_string()
            })
        );
    }

    #[test]
    fn test_suggestions_appear_after_four_chars() {
        let mut app = test_app();
        for c in "boh".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(app.suggestions.is_empty());

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.suggestions.len(), 2);
    }

    #[test]
    fn test_tab_cycles_through_suggestions_and_back() {
        let mut app = test_app();
        for c in "bohemian".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.suggestion_idx, None);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.suggestion_idx, Some(0));
        assert_eq!(app.active_query(), "bohemian rhapsody queen");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.suggestion_idx, Some(1));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.suggestion_idx, None);
        assert_eq!(app.active_query(), "bohemian");
    }

    #[test]
    fn test_recommend_command_uses_active_suggestion() {
        let mut app = test_app();
        for c in "bohemian".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        let command = press(&mut app, KeyCode::Enter);

        assert_eq!(
            command,
            Some(UiCommand::Recommend {
                query: "bohemian rhapsody queen".to_string()
            })
        );
    }

    #[test]
    fn test_result_selection_clamped() {
        let mut app = test_app();
        app.apply_results(vec![enriched("A", None), enriched("B", None)]);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_quit_keys_per_view() {
        let mut app = test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = test_app();
        app.video_link = Some("http://x".to_string());
        press_ctrl(&mut app, 's');
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
