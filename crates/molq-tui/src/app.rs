//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every submit performs its
//! blocking network call inline — one user action, one call (or one bounded
//! per-CID series), nothing cancellable, matching the strictly sequential
//! interaction model of the original interface.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    forms::{build_query, FormState, Mode},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        form::Form,
        help::HelpPopup,
        mode_list::{ModeList, ModeListState},
        results::{NoticeKind, Results, ResultsState},
        structure_view::{GalleryState, StructureView},
        title_bar::TitleBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use molq_client::PugClient;
use molq_core::{config::Config, Artifact, Cid, Query, SimilarityStore};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Modes,
    Form,
    Results,
    Gallery,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub mode_list: ModeListState,
    /// One form per entry of [`Mode::ALL`], index-aligned, so typed input
    /// survives switching modes.
    pub forms: Vec<FormState>,
    pub results: ResultsState,
    pub gallery: GalleryState,
    /// CIDs from the most recent similarity search; read by "view all".
    pub store: SimilarityStore,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    client: PugClient,
}

impl App {
    pub fn new(config: Config, theme: Theme, client: PugClient) -> Self {
        let forms: Vec<FormState> = Mode::ALL.iter().map(|m| m.form()).collect();
        let results = ResultsState::new(
            config.ui.show_timestamps,
            config.ui.timestamp_format.clone(),
        );

        let state = AppState {
            mode_list: ModeListState::default(),
            forms,
            results,
            gallery: GalleryState::default(),
            store: SimilarityStore::new(),
            focus: Focus::Modes,
            prev_focus: Focus::Modes,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state, client }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.state.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.state.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.state.command_bar.clear();
                    self.state.focus = self.state.prev_focus;
                }
                AppEvent::Enter => {
                    let input = self.state.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.state.command_bar.clear();
                            self.state.focus = self.state.prev_focus;
                            self.execute_command(cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            self.state.command_bar.clear();
                            self.state.focus = self.state.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.state.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.state.command_bar.handle(&other),
            }
            return;
        }

        match event {
            // Toggle help (only when not typing in the form)
            AppEvent::Char('?') if self.state.focus != Focus::Form => {
                tracing::debug!("help popup opened");
                self.state.show_help = true;
            }

            // Enter command mode with `:` (not from the form)
            AppEvent::Char(':') if self.state.focus != Focus::Form => {
                tracing::debug!(prev_focus = ?self.state.focus, "entering command mode");
                self.state.prev_focus = self.state.focus;
                self.state.command_bar.clear();
                self.state.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.state.quit = true;
            }

            // Return focus from the form
            AppEvent::Escape => {
                if self.state.focus == Focus::Form {
                    tracing::debug!("focus: Form -> Modes");
                    self.state.focus = Focus::Modes;
                }
            }

            // Tab-cycle focus: Modes → Form → Results → Gallery → Modes
            AppEvent::FocusNext => {
                let next = match self.state.focus {
                    Focus::Modes => Focus::Form,
                    Focus::Form => Focus::Results,
                    Focus::Results => Focus::Gallery,
                    Focus::Gallery | Focus::Command => Focus::Modes,
                };
                tracing::debug!(from = ?self.state.focus, to = ?next, "focus cycle");
                self.state.focus = next;
            }

            // Jump to the form
            AppEvent::FormFocus => {
                tracing::debug!("focus -> Form");
                self.state.focus = Focus::Form;
            }

            // Render the stored similarity compounds
            AppEvent::ViewAll => self.view_all(),

            // Submit the form, or enter it from the mode list
            AppEvent::Enter => match self.state.focus {
                Focus::Modes => self.state.focus = Focus::Form,
                Focus::Form => self.submit(),
                _ => {}
            },

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.state.focus {
            Focus::Modes => self.state.mode_list.handle(&event),
            Focus::Form => {
                self.state.forms[self.state.mode_list.selected].handle(&event);
            }
            Focus::Results => self.state.results.handle(&event),
            Focus::Gallery => self.state.gallery.handle(&event),
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }

    /// Execute a parsed [`Command`] against the application.
    fn execute_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => {
                self.state.quit = true;
            }
            Command::Help => {
                self.state.show_help = !self.state.show_help;
            }
            Command::Theme(name) => {
                self.state.theme = match name.to_ascii_lowercase().as_str() {
                    "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                    _ => Theme::load_default(),
                };
            }
            Command::Timestamps => {
                self.state.results.show_timestamps = !self.state.results.show_timestamps;
            }
            Command::Clear => {
                self.state.results.clear();
            }
            Command::Tail => {
                self.state.results.handle(&AppEvent::ScrollToTail);
            }
            Command::ViewAll => self.view_all(),
        }
    }

    // -----------------------------------------------------------------------
    // Actions — each performs its blocking call(s) and reports via notices
    // -----------------------------------------------------------------------

    /// Parse the active form and run the search it describes.
    fn submit(&mut self) {
        let built = build_query(&self.state.forms[self.state.mode_list.selected]);
        match built {
            Err(msg) => self.state.results.push(NoticeKind::Error, msg),
            Ok(query) => self.perform(self.state.mode_list.mode(), &query),
        }
    }

    fn perform(&mut self, mode: Mode, query: &Query) {
        tracing::debug!(?mode, ?query, "performing search");
        match self.client.search(query) {
            Err(e) => self.state.results.push(NoticeKind::Error, e.to_string()),
            Ok(artifact) => self.render_artifact(mode, query, artifact),
        }
    }

    fn render_artifact(&mut self, mode: Mode, query: &Query, artifact: Artifact) {
        match artifact {
            Artifact::NoMatches => {
                if mode == Mode::BySimilarity {
                    // The store is replaced even by an empty result, so
                    // "view all" reflects the latest search, not a stale one.
                    self.state.store.replace(Vec::new());
                    self.state
                        .results
                        .push(NoticeKind::Error, "No similar compounds found.");
                } else {
                    self.state.results.push(NoticeKind::Warn, "No results.");
                }
            }

            Artifact::Identifiers(cids) => {
                let joined = cids
                    .iter()
                    .map(Cid::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                if mode == Mode::BySimilarity {
                    self.state.results.push(
                        NoticeKind::Success,
                        format!("Found {} similar compounds.", cids.len()),
                    );
                    self.state
                        .results
                        .push(NoticeKind::Info, format!("CIDs: {joined}"));
                    self.state.store.replace(cids);
                } else {
                    self.state
                        .results
                        .push(NoticeKind::Success, format!("Found CIDs: {joined}"));
                    self.show_structures(&cids);
                }
            }

            Artifact::Record(value) => {
                let headline = match query {
                    Query::ByCid { cid } => {
                        format!("Retrieved properties for CID {cid}.")
                    }
                    Query::FullRecordJson { cid } => {
                        format!("Successfully retrieved the JSON response for CID {cid}.")
                    }
                    _ => "Retrieved cross-reference substances.".to_string(),
                };
                self.state.results.push(NoticeKind::Success, headline);
                let pretty = serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|_| value.to_string());
                self.state.results.push_body(&pretty);

                // The property view also shows the compound's structure
                if let Query::ByCid { cid } = query {
                    self.show_structures(&[cid.clone()]);
                }
            }

            Artifact::Document(bytes) => self.save_document(query, &bytes),

            // Searches never produce a bare structure; images arrive via
            // show_structures. Render it anyway rather than dropping it.
            Artifact::Structure(img) => {
                if let Query::ByCid { cid } | Query::FullRecordJson { cid } = query {
                    self.state.gallery.clear();
                    self.state.gallery.push(cid.clone(), img);
                }
            }
        }
    }

    /// Fetch and display a structure per CID, in order. One compound's
    /// failure is reported as its own notice and never aborts the rest.
    fn show_structures(&mut self, cids: &[Cid]) {
        self.state.gallery.clear();
        for (cid, result) in self.client.structures(cids) {
            match result {
                Ok(img) => self.state.gallery.push(cid, img),
                Err(e) => self.state.results.push(
                    NoticeKind::Error,
                    format!("Could not retrieve image for CID {cid}: {e}"),
                ),
            }
        }
    }

    /// Render every compound held in the similarity store, in stored order.
    fn view_all(&mut self) {
        if self.state.store.is_empty() {
            self.state.results.push(
                NoticeKind::Warn,
                "No compounds to display. Perform a search first.",
            );
            return;
        }
        let cids = self.state.store.cids().to_vec();
        self.state.results.push(
            NoticeKind::Info,
            format!("Displaying {} stored compounds.", cids.len()),
        );
        self.show_structures(&cids);
    }

    /// Write an SDF document into the configured download directory.
    fn save_document(&mut self, query: &Query, bytes: &[u8]) {
        let Query::FullRecordSdf { cid } = query else {
            return;
        };
        let path = std::path::Path::new(&self.state.config.downloads.dir)
            .join(format!("CID_{cid}.sdf"));
        match std::fs::write(&path, bytes) {
            Ok(()) => self.state.results.push(
                NoticeKind::Success,
                format!(
                    "Successfully retrieved the SDF file for CID {cid}. Saved {}.",
                    path.display()
                ),
            ),
            Err(e) => self.state.results.push(
                NoticeKind::Error,
                format!("Could not save {}: {e}", path.display()),
            ),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Form | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line title bar | body
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    // Horizontal body split: modes sidebar | form + results | structure pane
    let pct = state.config.ui.sidebar_width_pct;
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Percentage(pct),
            Constraint::Fill(1),
            Constraint::Percentage(38),
        ])
        .split(vert[1]);

    let active_form = &state.forms[state.mode_list.selected];

    // Centre column: the active form on top, results below
    let form_height = active_form.fields.len() as u16 + 2;
    let centre = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Fill(1)])
        .split(horiz[1]);

    frame.render_widget(TitleBar::new(state.mode_list.mode(), &state.theme), vert[0]);
    frame.render_widget(
        ModeList::new(&state.mode_list, state.focus == Focus::Modes, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        Form::new(active_form, state.focus == Focus::Form, &state.theme),
        centre[0],
    );
    frame.render_widget(
        Results::new(&state.results, state.focus == Focus::Results, &state.theme),
        centre[1],
    );
    frame.render_widget(
        StructureView::new(&state.gallery, state.focus == Focus::Gallery, &state.theme),
        horiz[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom() - 1,
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip form cursor below
    }

    // Position the terminal cursor when a text field of the form is focused
    if state.focus == Focus::Form {
        let form = Form::new(active_form, true, &state.theme);
        if let Some((cx, cy)) = form.cursor_position(centre[0]) {
            frame.set_cursor_position((cx, cy));
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Client bound to a port nothing listens on; only tests that never
    /// reach the network use it.
    fn offline_app() -> App {
        let client = PugClient::new("http://127.0.0.1:1", Duration::from_millis(200));
        App::new(Config::defaults(), Theme::load_default(), client)
    }

    #[test]
    fn view_all_warns_identically_before_and_after_an_empty_search() {
        let mut app = offline_app();

        // Never searched — store starts empty
        app.view_all();
        let first = app.state.results.notices.last().unwrap().text.clone();
        assert_eq!(first, "No compounds to display. Perform a search first.");

        // Searched, found nothing — the store is replaced with an empty list
        app.state.store.replace(vec![Cid::from("1")]);
        app.state.store.replace(Vec::new());
        app.view_all();
        let second = app.state.results.notices.last().unwrap().text.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn focus_cycles_through_all_panes() {
        let mut app = offline_app();
        assert_eq!(app.state.focus, Focus::Modes);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Form);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Results);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Gallery);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Modes);
    }

    #[test]
    fn enter_on_mode_list_moves_into_the_form() {
        let mut app = offline_app();
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.focus, Focus::Form);
    }

    #[test]
    fn escape_leaves_the_form() {
        let mut app = offline_app();
        app.handle(AppEvent::FormFocus);
        assert_eq!(app.state.focus, Focus::Form);
        app.handle(AppEvent::Escape);
        assert_eq!(app.state.focus, Focus::Modes);
    }

    #[test]
    fn malformed_mass_becomes_an_error_notice_without_a_network_call() {
        let mut app = offline_app();
        // Select "By Mass" (index 4) and corrupt the "Value" field
        app.state.mode_list.selected = 4;
        let form = &mut app.state.forms[4];
        form.selected = 2;
        for _ in 0.."400.0".len() {
            form.handle(&AppEvent::Backspace);
        }
        form.handle(&AppEvent::Char('x'));

        app.state.focus = Focus::Form;
        app.handle(AppEvent::Enter);

        let last = app.state.results.notices.last().unwrap();
        assert_eq!(last.kind, NoticeKind::Error);
        assert_eq!(last.text, "Value must be a number");
    }

    #[test]
    fn failed_search_keeps_the_session_interactive() {
        let mut app = offline_app();
        // Default "By CID" form against a dead port → transport error notice
        app.state.focus = Focus::Form;
        app.handle(AppEvent::Enter);
        let last = app.state.results.notices.last().unwrap();
        assert_eq!(last.kind, NoticeKind::Error);
        assert!(last.text.starts_with("Failed to fetch data:"), "{}", last.text);
        // The loop is still live: quit still works
        assert!(!app.state.quit);
        app.handle(AppEvent::Quit);
        assert!(app.state.quit);
    }

    #[test]
    fn help_popup_intercepts_until_closed() {
        let mut app = offline_app();
        app.handle(AppEvent::Char('?'));
        assert!(app.state.show_help);
        // Other keys are swallowed
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Modes);
        app.handle(AppEvent::Escape);
        assert!(!app.state.show_help);
    }

    #[test]
    fn command_bar_round_trip() {
        let mut app = offline_app();
        app.handle(AppEvent::Char(':'));
        assert_eq!(app.state.focus, Focus::Command);
        for c in "ts".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.focus, Focus::Modes);
        assert!(!app.state.results.show_timestamps);
    }

    #[test]
    fn unknown_command_keeps_the_bar_open_with_an_error() {
        let mut app = offline_app();
        app.handle(AppEvent::Char(':'));
        for c in "bogus".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.focus, Focus::Command);
        assert_eq!(
            app.state.command_bar.error.as_deref(),
            Some("unknown command: bogus")
        );
    }

    #[test]
    fn view_all_command_matches_the_key_binding() {
        let mut app = offline_app();
        app.handle(AppEvent::Char(':'));
        for c in "all".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        let last = app.state.results.notices.last().unwrap();
        assert_eq!(last.kind, NoticeKind::Warn);
    }
}
