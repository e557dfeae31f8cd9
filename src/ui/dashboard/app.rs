use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::{Error, Result};
use crate::profile::{ProfileSource, ProfileSummary, ProfileWidget};
use crate::storage::SlotStore;
use crate::tabs::{Tab, TabSwitcher};
use crate::todo::{ActionOutcome, Filter, TodoEvent, TodoWidget};

use super::view;

const EVENT_POLL_MS: u64 = 120;

struct LookupRequest {
    username: String,
}

enum UiMsg {
    ProfileLoaded(String, Result<ProfileSummary>),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// Which part of the todo tab receives keys.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum TodoFocus {
    Input,
    List,
}

pub struct AppState<S> {
    pub(crate) tabs: TabSwitcher,
    pub(crate) todo: TodoWidget<S>,
    pub(crate) profile: ProfileWidget,
    pub(crate) focus: TodoFocus,
    pub(crate) selected: usize,
    pub(crate) show_help: bool,
    status_message: Option<(String, StatusKind)>,
}

impl<S: SlotStore> AppState<S> {
    pub fn new(todo: TodoWidget<S>, active: Tab) -> Self {
        Self {
            tabs: TabSwitcher::new(active),
            todo,
            profile: ProfileWidget::new(),
            focus: TodoFocus::Input,
            selected: 0,
            show_help: false,
            status_message: None,
        }
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(error) = self.todo.repository().last_save_error() {
            return Some((format!("not saved: {error}"), StatusKind::Error));
        }
        self.status_message.clone()
    }

    pub(crate) fn footer_hint(&self) -> String {
        match self.tabs.active() {
            Tab::Todo => match self.focus {
                TodoFocus::Input => "enter add  esc list  tab switch  ctrl-c quit".to_string(),
                TodoFocus::List => {
                    "space toggle  d delete  a/p/c filter  i input  ? help  q quit".to_string()
                }
            },
            Tab::Profile => "enter search  esc clear  tab switch  ctrl-c quit".to_string(),
        }
    }

    pub(crate) fn task_count_summary(&self) -> String {
        let counters = self.todo.view().counters;
        format!(
            "total {}  pending {}  completed {}",
            counters.total, counters.pending, counters.completed
        )
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some((message, StatusKind::Error));
    }

    fn set_info(&mut self, message: String) {
        if message.is_empty() {
            self.status_message = None;
        } else {
            self.status_message = Some((message, StatusKind::Info));
        }
    }

    fn dispatch(&mut self, event: TodoEvent) {
        let outcome = self.todo.handle(event);
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        self.clamp_selection();
        self.set_info(outcome.message);
    }

    fn clamp_selection(&mut self) {
        let len = self.todo.view().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.todo.view().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    fn activate_selected(&mut self, delete: bool) {
        let Some(item) = self.todo.view().item(self.selected) else {
            self.set_error("no task selected".to_string());
            return;
        };
        let control = if delete {
            item.delete.clone()
        } else {
            item.toggle.clone()
        };
        self.dispatch(TodoEvent::Activate(control));
    }

    fn set_filter(&mut self, filter: Filter) {
        self.dispatch(TodoEvent::SetFilter(filter));
        self.selected = 0;
    }
}

pub fn run<S, P>(todo: TodoWidget<S>, source: P, active: Tab) -> Result<()>
where
    S: SlotStore,
    P: ProfileSource + Send + 'static,
{
    let (ui_tx, ui_rx) = mpsc::channel();
    let (req_tx, req_rx) = mpsc::channel();

    spawn_lookup_worker(source, req_rx, ui_tx);

    let mut app = AppState::new(todo, active);
    run_terminal(&mut app, ui_rx, req_tx)
}

fn run_terminal<S: SlotStore>(
    app: &mut AppState<S>,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<LookupRequest>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, ui_rx, req_tx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<S: SlotStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<S>,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<LookupRequest>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(msg) = ui_rx.try_recv() {
            handle_ui_msg(app, msg);
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if handle_key(app, key, &req_tx)? {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_ui_msg<S: SlotStore>(app: &mut AppState<S>, msg: UiMsg) {
    match msg {
        UiMsg::ProfileLoaded(username, result) => app.profile.finish(&username, result),
    }
}

/// Returns `Ok(true)` when the app should quit.
fn handle_key<S: SlotStore>(
    app: &mut AppState<S>,
    key: KeyEvent,
    req_tx: &Sender<LookupRequest>,
) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match key.code {
        KeyCode::Tab => {
            app.tabs.next();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.tabs.previous();
            return Ok(false);
        }
        _ => {}
    }

    match app.tabs.active() {
        Tab::Todo => Ok(handle_todo_key(app, key)),
        Tab::Profile => {
            handle_profile_key(app, key, req_tx)?;
            Ok(false)
        }
    }
}

fn handle_todo_key<S: SlotStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    if app.focus == TodoFocus::Input {
        match key.code {
            KeyCode::Enter => app.dispatch(TodoEvent::EnterKey),
            KeyCode::Esc => app.focus = TodoFocus::List,
            KeyCode::Backspace => {
                app.todo.input_mut().pop();
            }
            KeyCode::Char(ch) => app.todo.input_mut().push(ch),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('i') | KeyCode::Enter => app.focus = TodoFocus::Input,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.move_selection(isize::MAX / 2),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.activate_selected(false),
        KeyCode::Char('d') | KeyCode::Delete => app.activate_selected(true),
        KeyCode::Char('a') => app.set_filter(Filter::All),
        KeyCode::Char('p') => app.set_filter(Filter::Pending),
        KeyCode::Char('c') => app.set_filter(Filter::Completed),
        KeyCode::Char('1') => app.tabs.activate(Tab::Todo),
        KeyCode::Char('2') => app.tabs.activate(Tab::Profile),
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Esc => app.show_help = false,
        _ => {}
    }
    false
}

fn handle_profile_key<S: SlotStore>(
    app: &mut AppState<S>,
    key: KeyEvent,
    req_tx: &Sender<LookupRequest>,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            if let Some(username) = app.profile.submit() {
                req_tx.send(LookupRequest { username }).map_err(|_| {
                    Error::OperationFailed("profile lookup worker stopped".to_string())
                })?;
            }
        }
        KeyCode::Esc => app.profile.clear(),
        KeyCode::Backspace => {
            app.profile.input_mut().pop();
        }
        KeyCode::Char(ch) => app.profile.input_mut().push(ch),
        _ => {}
    }
    Ok(())
}

fn spawn_lookup_worker<P>(source: P, req_rx: Receiver<LookupRequest>, ui_tx: Sender<UiMsg>)
where
    P: ProfileSource + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            let result = source.lookup(&request.username);
            if ui_tx
                .send(UiMsg::ProfileLoaded(request.username, result))
                .is_err()
            {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileStatus;
    use crate::storage::MemorySlotStore;
    use crate::todo::DEFAULT_SLOT;

    struct FixedSource;

    impl ProfileSource for FixedSource {
        fn lookup(&self, username: &str) -> Result<ProfileSummary> {
            if username == "missing" {
                return Err(Error::ProfileNotFound(username.to_string()));
            }
            let record: crate::profile::UserRecord =
                serde_json::from_str(&format!(r#"{{"login":"{username}"}}"#))?;
            Ok(record.into())
        }
    }

    fn app() -> AppState<MemorySlotStore> {
        AppState::new(
            TodoWidget::open(MemorySlotStore::new(), DEFAULT_SLOT),
            Tab::Todo,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<S: SlotStore>(app: &mut AppState<S>, text: &str, tx: &Sender<LookupRequest>) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)), tx).expect("key");
        }
    }

    #[test]
    fn typing_and_enter_adds_task() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel();
        type_text(&mut app, "buy milk", &tx);
        handle_key(&mut app, key(KeyCode::Enter), &tx).expect("enter");

        assert_eq!(app.todo.view().len(), 1);
        assert_eq!(app.todo.input(), "");
        assert_eq!(app.task_count_summary(), "total 1  pending 1  completed 0");
    }

    #[test]
    fn list_keys_toggle_filter_and_delete_selected() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel();
        for text in ["a", "b"] {
            type_text(&mut app, text, &tx);
            handle_key(&mut app, key(KeyCode::Enter), &tx).expect("enter");
        }
        handle_key(&mut app, key(KeyCode::Esc), &tx).expect("esc");
        assert_eq!(app.focus, TodoFocus::List);

        handle_key(&mut app, key(KeyCode::Down), &tx).expect("down");
        handle_key(&mut app, key(KeyCode::Char(' ')), &tx).expect("toggle");
        assert!(app.todo.view().items[1].task.completed());

        handle_key(&mut app, key(KeyCode::Char('c')), &tx).expect("filter");
        assert_eq!(app.todo.view().len(), 1);
        assert_eq!(app.selected, 0);

        handle_key(&mut app, key(KeyCode::Char('d')), &tx).expect("delete");
        assert!(app.todo.view().is_empty());
        assert_eq!(app.todo.view().counters.total, 1);
    }

    #[test]
    fn quit_only_from_list_focus() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel();
        assert!(!handle_key(&mut app, key(KeyCode::Char('q')), &tx).expect("q"));
        assert_eq!(app.todo.input(), "q");
        handle_key(&mut app, key(KeyCode::Esc), &tx).expect("esc");
        assert!(handle_key(&mut app, key(KeyCode::Char('q')), &tx).expect("q"));
    }

    #[test]
    fn tab_switch_keeps_todo_input() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel();
        type_text(&mut app, "draft", &tx);
        handle_key(&mut app, key(KeyCode::Tab), &tx).expect("tab");
        assert_eq!(app.tabs.active(), Tab::Profile);
        type_text(&mut app, "octocat", &tx);
        handle_key(&mut app, key(KeyCode::BackTab), &tx).expect("backtab");
        assert_eq!(app.todo.input(), "draft");
        assert_eq!(app.profile.input(), "octocat");
    }

    #[test]
    fn profile_lookup_round_trips_through_worker() {
        let mut app = app();
        let (req_tx, req_rx) = mpsc::channel();
        let (ui_tx, ui_rx) = mpsc::channel();
        spawn_lookup_worker(FixedSource, req_rx, ui_tx);

        app.tabs.activate(Tab::Profile);
        type_text(&mut app, "missing", &req_tx);
        handle_key(&mut app, key(KeyCode::Enter), &req_tx).expect("enter");
        assert!(app.profile.is_loading());

        let msg = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker reply");
        handle_ui_msg(&mut app, msg);
        assert_eq!(
            app.profile.status(),
            &ProfileStatus::Failed("User not found".to_string())
        );
    }
}
