// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, page results)
// - Handing queued requests to the dispatcher

pub mod app;
pub mod clipboard;
pub mod components;
pub mod modal;
mod views;

use crate::api::ApiClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::pages::{spawn_request, PageEvent};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Lines moved by PageUp/PageDown inside modals
const MODAL_PAGE: u16 = 10;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop and restores the terminal
/// when the user quits.
pub async fn run_tui(config: Config, client: ApiClient, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (tx, mut rx) = mpsc::channel(256);
    let mut app = App::new(&config, log_buffer);
    let mut dispatcher = Dispatcher {
        client,
        locale: config.locale.clone(),
        tx,
    };

    let result = run_event_loop(&mut terminal, &mut app, &mut dispatcher, &mut rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Spawns page requests and routes their results back to the loop
struct Dispatcher {
    client: ApiClient,
    locale: String,
    tx: mpsc::Sender<PageEvent>,
}

impl Dispatcher {
    fn flush(&mut self, app: &mut App) {
        for (page, request) in app.take_requests() {
            let Some(resource) = app.pages.get(page).map(|p| p.config().clone()) else {
                continue;
            };
            spawn_request(
                self.client.clone(),
                resource,
                page,
                self.locale.clone(),
                request,
                self.tx.clone(),
            );
        }
    }
}

/// Main event loop
///
/// Handles three types of events:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Page results from dispatched requests
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    event_rx: &mut mpsc::Receiver<PageEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        dispatcher.flush(app);

        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(page_event) = event_rx.recv() => {
                app.handle_page_event(page_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Text input → Global → Page
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: Typing into a filter, cell or form field
    if handle_text_input(app, &key_event) {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 4: Page keys
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.move_right(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Enter => app.activate(),
        KeyCode::Esc => {
            app.cancel_edit();
        }
        KeyCode::Char(' ') | KeyCode::Char('+') => app.cycle(true),
        KeyCode::Char('-') => app.cycle(false),
        KeyCode::Char('s') => app.sort_current(),
        KeyCode::Char('d') => app.remove_current(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('y') => app.copy_row(),
        KeyCode::Char('v') => app.open_detail(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::PageUp => app.previous_page(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp if app.modal.is_some() => {
            app.modal_scroll = app.modal_scroll.saturating_sub(1);
        }
        MouseEventKind::ScrollDown if app.modal.is_some() => {
            app.modal_scroll = app.modal_scroll.saturating_add(1);
        }
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = app.modal.as_ref() else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => {
            app.modal = None;
            app.modal_scroll = 0;
        }
        ModalAction::ScrollUp => app.modal_scroll = app.modal_scroll.saturating_sub(1),
        ModalAction::ScrollDown => app.modal_scroll = app.modal_scroll.saturating_add(1),
        ModalAction::PageUp => app.modal_scroll = app.modal_scroll.saturating_sub(MODAL_PAGE),
        ModalAction::PageDown => app.modal_scroll = app.modal_scroll.saturating_add(MODAL_PAGE),
        ModalAction::ScrollTop => app.modal_scroll = 0,
        // Clamped to the content when drawn
        ModalAction::ScrollBottom => app.modal_scroll = u16::MAX,
        ModalAction::Copy => app.copy_row(),
    }

    true
}

/// Keys while a text field has the input - returns true if handled
fn handle_text_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.input.is_none() {
        return false;
    }
    match key_event.code {
        KeyCode::Enter => app.finish_input(),
        KeyCode::Esc => app.abort_input(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_char(c)
        }
        // Ctrl+C still quits
        KeyCode::Char('c') => app.should_quit = true,
        _ => {}
    }
    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('?') => app.open_modal(modal::Modal::help()),
        KeyCode::Char('L') => app.open_modal(modal::Modal::logs()),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            app.select_tab(idx);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::app::{Focus, InputTarget};
    use super::modal::Modal;
    use super::*;
    use crate::api::ListPage;
    use crate::pages::{Outcome, Request};
    use crate::table::{Record, Row};
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// App on the brands tab with two rows loaded
    fn brands_app() -> App {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        let requests = app.take_requests();
        let Some((page, Request::List { seq, .. })) = requests.into_iter().next() else {
            panic!("expected initial list");
        };
        let items = ["Acme", "Bolt"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Record::from_json(
                    json!({ "_id": format!("b{i}"), "name": name, "country": "UA" }),
                    "_id",
                )
                .unwrap()
            })
            .collect();
        app.handle_page_event(PageEvent {
            page,
            outcome: Outcome::Listed {
                seq,
                result: Ok(ListPage { items, count: 45 }),
            },
        });
        app
    }

    fn only_request(app: &mut App) -> Request {
        let mut requests = app.take_requests();
        assert_eq!(requests.len(), 1, "{requests:?}");
        requests.remove(0).1
    }

    #[test]
    fn text_filter_applies_on_enter_only() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input, Some(InputTarget::Filter("name".into())));

        type_text(&mut app, "red");
        assert!(app.take_requests().is_empty());

        press(&mut app, KeyCode::Enter);
        let Request::List { query, .. } = only_request(&mut app) else {
            panic!("expected list");
        };
        assert_eq!(query.filters[0], ("name".to_string(), "red".to_string()));
        assert_eq!(app.input, None);
    }

    #[test]
    fn select_filter_applies_immediately() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        let Request::List { query, .. } = only_request(&mut app) else {
            panic!("expected list");
        };
        assert_eq!(query.filters[1].0, "country");
        assert!(!query.filters[1].1.is_empty());
    }

    #[test]
    fn cell_edit_commits_update_and_esc_cancels() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.input, Some(InputTarget::Cell { .. })));

        type_text(&mut app, " Ltd");
        press(&mut app, KeyCode::Enter);
        let Request::Update(row) = only_request(&mut app) else {
            panic!("expected update");
        };
        assert_eq!(row.text("name"), "Acme Ltd");

        // Draft survives until the update result arrives; Esc drops it
        let table = app.page().unwrap().table().unwrap();
        assert_eq!(table.editing_id(), Some("b0"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.page().unwrap().table().unwrap().editing_id(), None);
    }

    #[test]
    fn hotkeys_are_plain_text_while_typing() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "q1?");
        assert!(!app.should_quit);
        assert!(app.modal.is_none());
        assert_eq!(app.page().unwrap().table().unwrap().filters().get("name"), "q1?");
    }

    #[test]
    fn sort_remove_and_paging_queue_requests() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Char('s'));
        assert!(matches!(only_request(&mut app), Request::List { query, .. } if query.sort_field == "name"));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(only_request(&mut app), Request::Remove("b0".into()));

        press(&mut app, KeyCode::PageDown);
        assert!(matches!(only_request(&mut app), Request::List { query, .. } if query.page == 2));
        press(&mut app, KeyCode::PageUp);
        assert!(matches!(only_request(&mut app), Request::List { query, .. } if query.page == 1));
        press(&mut app, KeyCode::PageUp);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn form_submits_only_when_complete() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Form);

        // Jump to the Add button with an empty form
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.take_requests().is_empty());
        assert!(app.toast.is_some());

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Acme");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let Request::Add(row) = only_request(&mut app) else {
            panic!("expected add");
        };
        assert_eq!(row.text("name"), "Acme");
        assert!(!row.text("country").is_empty());
    }

    #[test]
    fn tabs_start_pages_once() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active, 3);
        assert_eq!(only_request(&mut app), Request::Options);

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('4'));
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn modal_absorbs_keys_until_closed() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modal, Some(Modal::Help));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert!(app.modal.is_none());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('v'));
        assert!(matches!(app.modal, Some(Modal::Detail { ref content, .. }) if content.contains("Acme")));
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn read_only_pages_ignore_form_focus() {
        let mut app = brands_app();
        press(&mut app, KeyCode::Char('6'));
        app.take_requests();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Table);
    }
}
