//! Application state and TUI event loop for the media planner.
//!
//! [`App`] owns the plan store, the theme and the state of every screen.
//! Key handling lives in [`App::handle_key`] so it can be driven without a
//! terminal.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use planner_core::budget::EditPolicy;
use planner_core::error::Result;
use planner_core::models::PlanStatus;
use planner_core::notifications::Notice;
use planner_data::query::PlanFilter;
use planner_data::store::PlanStore;

use crate::budget_view::{self, BudgetEditor, AMOUNT_STEP, PERCENT_STEP, TOTAL_STEP};
use crate::plan_detail;
use crate::plan_list::{self, PlanListState};
use crate::themes::Theme;

// ── Screen ────────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List,
    /// Detail of the plan with this id.
    Detail(String),
    Budget,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub screen: Screen,
    pub store: PlanStore,
    pub list: PlanListState,
    pub editor: Option<BudgetEditor>,
    pub policy: EditPolicy,
    /// Latest notice for the list and detail screens. The budget editor
    /// keeps its own.
    pub notice: Option<Notice>,
    /// Plan id waiting for delete confirmation.
    pub pending_delete: Option<String>,
    /// Screen to return to when the budget editor closes.
    budget_return: Screen,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, store: PlanStore, filter: PlanFilter, policy: EditPolicy) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            screen: Screen::List,
            store,
            list: PlanListState::new(filter),
            editor: None,
            policy,
            notice: None,
            pending_delete: None,
            budget_return: Screen::List,
            should_quit: false,
        }
    }

    /// Switch to the budget editor for plan `id`.
    pub fn open_budget(&mut self, id: &str) -> Result<()> {
        let plan = self.store.require(id)?.clone();
        let editor = BudgetEditor::new(plan, self.policy)?;
        self.budget_return = match &self.screen {
            Screen::Budget => Screen::List,
            other => other.clone(),
        };
        self.editor = Some(editor);
        self.screen = Screen::Budget;
        Ok(())
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The loop exits
    /// on `q` (outside text entry) or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Render the current screen into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            Screen::Detail(id) => {
                if let Some(plan) = self.store.get(id) {
                    plan_detail::render_plan_detail(
                        frame,
                        area,
                        plan,
                        self.notice.as_ref(),
                        &self.theme,
                    );
                    return;
                }
            }
            Screen::Budget => {
                if let Some(editor) = &self.editor {
                    budget_view::render_budget_view(frame, area, editor, &self.theme);
                    return;
                }
            }
            Screen::List => {}
        }
        plan_list::render_plan_list(
            frame,
            area,
            self.store.plans(),
            &self.list,
            self.notice.as_ref(),
            &self.theme,
        );
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if let Some(id) = self.pending_delete.take() {
            self.confirm_delete(&id, key.code);
            return;
        }
        match self.screen.clone() {
            Screen::List => self.handle_list_key(key.code),
            Screen::Detail(id) => self.handle_detail_key(&id, key.code),
            Screen::Budget => self.handle_budget_key(key.code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        if self.list.editing_search {
            match code {
                KeyCode::Char(ch) => self.list.push_search_char(ch),
                KeyCode::Backspace => self.list.pop_search_char(),
                KeyCode::Enter | KeyCode::Esc => self.list.editing_search = false,
                _ => {}
            }
            return;
        }

        let row_count = self.list.visible(self.store.plans()).len();
        let selected_id = self
            .list
            .selected_plan(self.store.plans())
            .map(|p| p.id.clone());

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(row_count),
            KeyCode::Up | KeyCode::Char('k') => self.list.select_previous(),
            KeyCode::Char('/') => self.list.editing_search = true,
            KeyCode::Char('s') => self.list.cycle_status(),
            KeyCode::Enter => {
                if let Some(id) = selected_id {
                    self.screen = Screen::Detail(id);
                }
            }
            KeyCode::Char('b') => {
                if let Some(id) = selected_id {
                    self.open_budget_or_notify(&id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = selected_id {
                    self.request_delete(id);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, id: &str, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::List,
            KeyCode::Char('s') => self.cycle_plan_status(id),
            KeyCode::Char('b') => self.open_budget_or_notify(id),
            _ => {}
        }
    }

    fn handle_budget_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.should_quit = true;
            return;
        }
        if code == KeyCode::Esc {
            self.close_budget();
            return;
        }
        if code == KeyCode::Char('w') {
            self.save_budget();
            return;
        }
        let Some(editor) = self.editor.as_mut() else {
            self.screen = Screen::List;
            return;
        };
        match code {
            KeyCode::Down | KeyCode::Char('j') => editor.select_next(),
            KeyCode::Up | KeyCode::Char('k') => editor.select_previous(),
            KeyCode::Right | KeyCode::Char('l') => editor.nudge_percentage(PERCENT_STEP),
            KeyCode::Left | KeyCode::Char('h') => editor.nudge_percentage(-PERCENT_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => editor.nudge_amount(AMOUNT_STEP),
            KeyCode::Char('-') => editor.nudge_amount(-AMOUNT_STEP),
            KeyCode::Char(']') => editor.scale_total(1.0 + TOTAL_STEP),
            KeyCode::Char('[') => editor.scale_total(1.0 - TOTAL_STEP),
            _ => {}
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn notify(&mut self, notice: Notice) {
        notice.log();
        self.notice = Some(notice);
    }

    fn open_budget_or_notify(&mut self, id: &str) {
        if let Err(e) = self.open_budget(id) {
            self.notify(Notice::error("Cannot edit budget").with_description(e.to_string()));
        }
    }

    fn close_budget(&mut self) {
        if let Some(editor) = self.editor.take() {
            if editor.is_dirty() {
                self.notify(Notice::info("Unsaved budget changes discarded"));
            }
        }
        self.screen = std::mem::replace(&mut self.budget_return, Screen::List);
    }

    fn save_budget(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let plan = editor.updated_plan();
        match self.store.upsert(plan.clone()) {
            Ok(()) => {
                editor.mark_saved(plan);
                if let Some(notice) = editor.notice() {
                    notice.log();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save budget");
                editor.set_notice(Notice::error("Save failed").with_description(e.to_string()));
            }
        }
    }

    fn cycle_plan_status(&mut self, id: &str) {
        let Some(mut plan) = self.store.get(id).cloned() else {
            return;
        };
        let pos = PlanStatus::ALL
            .iter()
            .position(|s| *s == plan.status)
            .unwrap_or(0);
        plan.status = PlanStatus::ALL[(pos + 1) % PlanStatus::ALL.len()];
        plan.touch();
        let status = plan.status;
        match self.store.upsert(plan) {
            Ok(()) => self.notify(
                Notice::success("Status updated")
                    .with_description(format!("Media plan status updated to {}.", status)),
            ),
            Err(e) => self.notify(Notice::error("Save failed").with_description(e.to_string())),
        }
    }

    fn request_delete(&mut self, id: String) {
        let client = self
            .store
            .get(&id)
            .map(|p| p.client_name.clone())
            .unwrap_or_default();
        self.notice = Some(Notice::info(format!(
            "Delete {}? Press y to confirm",
            client
        )));
        self.pending_delete = Some(id);
    }

    fn confirm_delete(&mut self, id: &str, code: KeyCode) {
        if !matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.notice = Some(Notice::info("Delete cancelled"));
            return;
        }
        match self.store.delete(id) {
            Ok(_) => {
                let rows = self.list.visible(self.store.plans()).len();
                self.list.clamp_selection(rows);
                self.notify(
                    Notice::success("Media plan deleted")
                        .with_description("The media plan has been permanently removed."),
                );
            }
            Err(e) => self.notify(Notice::error("Delete failed").with_description(e.to_string())),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::notifications::NoticeLevel;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn make_app(tmp: &TempDir) -> App {
        let store = PlanStore::open(tmp.path().join("plans.json"));
        App::new("dark", store, PlanFilter::default(), EditPolicy::Clamp)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_app_creation_defaults() {
        let tmp = TempDir::new().unwrap();
        let app = make_app(&tmp);
        assert_eq!(app.screen, Screen::List);
        assert_eq!(app.store.len(), 6);
        assert!(!app.should_quit);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = make_app(&tmp);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_mode_captures_q() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "lufthansa q");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list.filter.search, "lufthansa");
        assert!(!app.list.editing_search);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Detail("5".to_string()));
    }

    #[test]
    fn test_detail_status_cycle_persists() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        // First row is Volkswagen AG, approved.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Detail("1".to_string()));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.get("1").unwrap().status, PlanStatus::Running);
        assert_eq!(
            app.notice.as_ref().unwrap().text(),
            "Status updated: Media plan status updated to running."
        );
        let reopened = PlanStore::open(app.store.path());
        assert_eq!(reopened.get("1").unwrap().status, PlanStatus::Running);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::List);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.pending_delete.as_deref(), Some("1"));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 6);
        assert_eq!(app.notice.as_ref().unwrap().title, "Delete cancelled");

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.len(), 5);
        assert!(app.store.get("1").is_none());
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.title, "Media plan deleted");
        assert_eq!(notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.list.selected, 5);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.list.selected, 4);
    }

    #[test]
    fn test_budget_edit_and_save() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.screen, Screen::Budget);

        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.store.get("2").unwrap().total_budget(), Some(1_320_000.0));
        let editor = app.editor.as_ref().unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(editor.notice().unwrap().title, "Budget saved");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::List);
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_budget_escape_discards_unsaved_edits() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Detail("1".to_string()));
        assert_eq!(
            app.notice.as_ref().unwrap().title,
            "Unsaved budget changes discarded"
        );
        let stored = app.store.get("1").unwrap();
        assert_eq!(stored.budget.as_ref().unwrap().allocations[0].percentage, 40.0);
    }

    #[test]
    fn test_budget_for_plan_without_budget() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.screen, Screen::List);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Cannot edit budget");
    }

    #[test]
    fn test_open_budget_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        assert!(app.open_budget("nope").is_err());
        assert_eq!(app.screen, Screen::List);
    }

    #[test]
    fn test_render_each_screen_does_not_panic() {
        let tmp = TempDir::new().unwrap();
        let mut app = make_app(&tmp);
        let mut terminal = Terminal::new(TestBackend::new(150, 40)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        press(&mut app, KeyCode::Enter);
        terminal.draw(|frame| app.render(frame)).unwrap();
        press(&mut app, KeyCode::Char('b'));
        terminal.draw(|frame| app.render(frame)).unwrap();

        // A detail screen whose plan vanished falls back to the list.
        app.screen = Screen::Detail("missing".to_string());
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
