// App state and main event loop.
// Applies view updates and toasts, and maps keyboard input to actions.

use std::collections::HashMap;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::{debug, error, info};

use crate::actions::{self, Action};
use crate::controller::{ViewController, ViewUpdate};
use crate::event::{Event, EventHandler, EventSender};
use crate::figma::{FigmaApi, File, Node, ProjectFiles};
use crate::format::TimeAgo;
use crate::notify::{ActiveToast, NotificationSink, Toast};
use crate::state::{Collection, FileListState, PageMenu};
use crate::ui;

/// Whether keystrokes go to the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Main application state.
pub struct App<A: FigmaApi> {
    controller: ViewController<A, EventSender>,
    events: EventSender,
    /// Team whose files are listed.
    pub team_id: String,
    /// Project sections of the team.
    pub files: Collection<ProjectFiles>,
    pub list: FileListState,
    /// Page listings by file key, for every file whose pages were mounted.
    pub pages: HashMap<String, Collection<Node>>,
    /// Open page submenu.
    pub menu: Option<PageMenu>,
    pub toast: Option<ActiveToast>,
    pub time_ago: TimeAgo,
    /// Figma desktop app is installed; open files there.
    pub desktop_app: bool,
    /// Development mode enables clearing the cache from the UI.
    pub dev_mode: bool,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub should_quit: bool,
}

impl<A: FigmaApi> App<A> {
    pub fn new(
        controller: ViewController<A, EventSender>,
        events: EventSender,
        team_id: impl Into<String>,
        dev_mode: bool,
    ) -> Self {
        Self {
            controller,
            events,
            team_id: team_id.into(),
            files: Collection::new(),
            list: FileListState::new(),
            pages: HashMap::new(),
            menu: None,
            toast: None,
            time_ago: TimeAgo::new(),
            desktop_app: actions::desktop_app_installed(),
            dev_mode,
            input_mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
        }
    }

    /// Main event loop. Mounts the file listing and redraws after every event.
    pub async fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        events: &mut EventHandler,
    ) -> io::Result<()> {
        self.controller.mount_files();

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = self.handle_key(key) {
                    self.execute(action);
                }
            }
            Event::View(update) => self.apply_update(update),
            Event::Toast(toast) => self.toast = Some(ActiveToast::new(toast)),
            Event::Tick => {
                if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
                    self.toast = None;
                }
            }
            Event::Resize => {}
        }
    }

    fn apply_update(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Files(update) => {
                self.files.apply(update);
                self.list.sync(self.files.items());
            }
            ViewUpdate::Pages { file_key, update } => {
                let Some(pages) = self.pages.get_mut(&file_key) else {
                    debug!(%file_key, "dropping pages update for untracked file");
                    return;
                };
                pages.apply(update);
                if let Some(menu) = self.menu.as_mut().filter(|m| m.file.key == file_key) {
                    menu.sync(pages.items());
                }
            }
        }
    }

    /// Currently selected file.
    pub fn selected_file(&self) -> Option<&File> {
        self.list.selected_file(self.files.items())
    }

    /// Pages collection shown by the open submenu.
    pub fn menu_pages(&self) -> Option<&Collection<Node>> {
        self.menu.as_ref().and_then(|m| self.pages.get(&m.file.key))
    }

    /// Map a key press to state changes and, possibly, an action to run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return None;
        }

        if self.menu.is_some() {
            return self.handle_menu_key(key);
        }

        match self.input_mode {
            InputMode::Filter => {
                self.handle_filter_key(key);
                None
            }
            InputMode::Normal => self.handle_list_key(key),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        let sections = self.files.items();
        match key.code {
            KeyCode::Esc => {
                self.list.clear_filter(sections);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => self.list.pop_filter(sections),
            KeyCode::Down => self.list.select_next(sections),
            KeyCode::Up => self.list.select_prev(sections),
            KeyCode::Char(c) => self.list.push_filter(c, sections),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let sections = self.files.items();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.input_mode = InputMode::Filter,
            KeyCode::Esc => self.list.clear_filter(sections),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(sections),
            KeyCode::Up | KeyCode::Char('k') => self.list.select_prev(sections),
            KeyCode::Enter => {
                return self
                    .selected_file()
                    .map(|file| Action::open_file(file, self.desktop_app));
            }
            KeyCode::Char('b') => {
                return self
                    .selected_file()
                    .map(|file| Action::OpenUrl(actions::web_url(file)));
            }
            KeyCode::Char('c') => return self.selected_file().map(Action::copy_link),
            KeyCode::Char('p') => {
                if let Some(file) = self.selected_file().cloned() {
                    self.open_menu(file);
                }
            }
            KeyCode::Char('X') if self.dev_mode => return Some(Action::ClearCache),
            _ => {}
        }
        None
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Option<Action> {
        let menu = self.menu.as_mut()?;
        let pages = self
            .pages
            .get(&menu.file.key)
            .map(|c| c.items())
            .unwrap_or_default();

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.menu = None,
            KeyCode::Down | KeyCode::Char('j') => menu.select_next(pages),
            KeyCode::Up | KeyCode::Char('k') => menu.select_prev(pages),
            KeyCode::Enter => {
                return menu
                    .selected_page(pages)
                    .map(|page| Action::open_page(&menu.file, page));
            }
            _ => {}
        }
        None
    }

    /// Open the page submenu, mounting the file's pages on first use.
    fn open_menu(&mut self, file: File) {
        if !self.pages.contains_key(&file.key) {
            self.pages.insert(file.key.clone(), Collection::new());
            self.controller.mount_pages(file.clone());
        }

        let mut menu = PageMenu::new(file);
        if let Some(pages) = self.pages.get(&menu.file.key) {
            menu.sync(pages.items());
        }
        self.menu = Some(menu);
    }

    /// Run an action off the UI thread and report the outcome as a toast.
    fn execute(&mut self, action: Action) {
        let events = self.events.clone();

        if action == Action::ClearCache {
            self.toast = Some(ActiveToast::new(Toast::animated("Clearing cache")));
            let cache = self.controller.cache().clone();
            tokio::task::spawn_blocking(move || match cache.clear_all() {
                Ok(()) => {
                    info!("cleared cache");
                    events.notify(Toast::success("Cleared cache"));
                }
                Err(e) => {
                    error!(error = %e, "failed clearing cache");
                    events.notify(Toast::failure("Failed clearing cache").with_message(e.to_string()));
                }
            });
            return;
        }

        tokio::task::spawn_blocking(move || match actions::perform(&action) {
            Ok(()) => events.notify(Toast::success(action.done_message())),
            Err(e) => {
                error!(?action, error = %e, "action failed");
                events.notify(Toast::failure("Action failed").with_message(e.to_string()));
            }
        });
    }
}
