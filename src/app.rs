use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use tempfile::NamedTempFile;

use crate::controller::NoteController;
use crate::events::{Bounds, CardPart, FormPart, Hit, OverlayPart, ScrollOffset, Target, UiEvent};
use crate::models::Note;
use crate::palette::swatch_token;
use crate::storage::{
    ensure_dir, log_path, resolve_data_dir, restrict_file, save_config, storage_path,
    validate_data_dir, FileStore, KeyValueStore,
};
use crate::surface::Surfaces;
use crate::ui::{
    copy_note_to_clipboard, draw_notes, max_scroll, scroll_into_view, Focus, HitMap,
    NoteViewState,
};

const STATUS_MESSAGE_SECS: u64 = 2;
const NOTES_NAV_HINT: &str =
    "←↑↓→ move | Enter open | n new | c color | d delete | y copy | Esc quit";

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run() -> Result<()> {
    let bin_name = executable_name();
    let mut args = std::env::args().skip(1);
    let mut text_path: Option<PathBuf> = None;
    let mut data_dir_override: Option<PathBuf> = None;
    let mut set_data_dir: Option<PathBuf> = None;
    let mut mode_list = false;
    let mut self_check = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("{bin_name} v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_usage(&bin_name);
                return Ok(());
            }
            "-t" | "--text" => {
                let p = args.next().ok_or_else(|| anyhow!("--text requires a path"))?;
                text_path = Some(PathBuf::from(p));
            }
            "--data-dir" => {
                let p = args.next().ok_or_else(|| anyhow!("--data-dir requires a path"))?;
                data_dir_override = Some(PathBuf::from(p));
            }
            "--set-data-dir" => {
                let p = args
                    .next()
                    .ok_or_else(|| anyhow!("--set-data-dir requires a path"))?;
                set_data_dir = Some(PathBuf::from(p));
            }
            "-l" | "--list" => mode_list = true,
            "--self-check" => self_check = true,
            other => {
                print_usage(&bin_name);
                return Err(anyhow!("Unknown argument: {other}"));
            }
        }
    }

    if let Some(raw) = set_data_dir {
        let dir = validate_data_dir(&raw)?;
        ensure_dir(&dir)?;
        save_config(&dir)?;
        println!("Data directory set to {}", dir.display());
        return Ok(());
    }

    let data_dir = resolve_data_dir(data_dir_override.as_deref())?;
    ensure_dir(&data_dir)?;
    init_logging(&data_dir)?;
    info!("Using data dir {}", data_dir.display());

    if self_check {
        #[cfg(debug_assertions)]
        {
            return run_self_check(&data_dir);
        }
        #[cfg(not(debug_assertions))]
        {
            return Err(anyhow!("--self-check is only available in development builds"));
        }
    }

    let store = FileStore::new(storage_path(&data_dir));
    info!("Notes stored in {}", store.path().display());
    let mut controller = NoteController::new(store);

    if mode_list {
        print_notes(controller.notes());
        return Ok(());
    }

    if let Some(text_path) = text_path {
        return handle_text_mode(text_path, &mut controller);
    }

    run_tui_notes(&mut controller)
}

fn init_logging(data_dir: &Path) -> Result<()> {
    let path = log_path(data_dir);
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    restrict_file(&path)?;
    // The terminal belongs to the UI, so logs only go to the file.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| anyhow!("Failed to start logging: {e}"))
}

fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes.");
        return;
    }
    for note in notes {
        let preview = if note.is_blank() {
            "(empty)"
        } else if note.title.is_empty() {
            note.text.lines().next().unwrap_or_default()
        } else {
            note.title.as_str()
        };
        println!("{:>4}  {:<8}  {preview}", note.id, note.color);
    }
}

/// Imports a file through the regular form submit, so blank input is refused.
fn handle_text_mode<S: KeyValueStore>(
    text_path: PathBuf,
    controller: &mut NoteController<S>,
) -> Result<()> {
    let content = fs::read_to_string(&text_path)
        .map_err(|e| anyhow!("Failed to read {}: {e}", text_path.display()))?;
    let title = text_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let before = controller.notes().len();
    let form = controller.form_mut();
    form.title = title.clone();
    form.text = content;
    controller.dispatch(UiEvent::Submit);

    match controller.notes().get(before) {
        Some(note) => println!("Stored note '{}' as #{}.", title, note.id),
        None => println!("Nothing to import from {}.", text_path.display()),
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
    /// Hand the overlay text to `$EDITOR`.
    OpenEditor,
}

struct Session {
    hits: HitMap,
    /// Target under the mouse pointer.
    hovered: Option<Hit>,
    /// Color icon hovered from the keyboard with `c`.
    key_hover: Option<Hit>,
    cursor: usize,
    focus: Focus,
    status: String,
    status_until: Option<Instant>,
    quit_overlay: bool,
}

impl Session {
    fn new() -> Self {
        Self {
            hits: HitMap::default(),
            hovered: None,
            key_hover: None,
            cursor: 0,
            focus: Focus::None,
            status: NOTES_NAV_HINT.to_string(),
            status_until: None,
            quit_overlay: false,
        }
    }

    fn cursor_id(&self, surfaces: &Surfaces) -> Option<u64> {
        let last = surfaces.grid.len().checked_sub(1)?;
        surfaces.grid.get(self.cursor.min(last)).map(|card| card.id)
    }

    fn card_hit(&self, surfaces: &Surfaces, part: CardPart) -> Option<Hit> {
        let id = self.cursor_id(surfaces)?;
        let target = Target::Card { id, part };
        Some(
            self.hits
                .find(&target)
                .cloned()
                .unwrap_or_else(|| Hit::new(target, Bounds::default())),
        )
    }

    fn hit_for(&self, target: Target) -> Hit {
        self.hits
            .find(&target)
            .cloned()
            .unwrap_or_else(|| Hit::new(target, Bounds::default()))
    }

    /// Keeps keyboard focus on a field that is still on screen.
    fn sync_focus(&mut self, surfaces: &Surfaces) {
        if surfaces.overlay.open {
            if !matches!(self.focus, Focus::OverlayTitle | Focus::OverlayText) {
                self.focus = Focus::OverlayTitle;
            }
            return;
        }
        self.focus = match self.focus {
            Focus::OverlayTitle | Focus::OverlayText => Focus::None,
            Focus::FormTitle | Focus::FormText if !surfaces.form.open => Focus::None,
            Focus::FormTitle if !surfaces.form.title_display.is_visible() => Focus::FormText,
            other => other,
        };
    }

    fn expire_status(&mut self) {
        if let Some(until) = self.status_until {
            if Instant::now() >= until {
                self.status = NOTES_NAV_HINT.to_string();
                self.status_until = None;
            }
        }
    }

    fn track_status(&mut self, previous: &str) {
        if self.status != previous {
            if self.status == NOTES_NAV_HINT {
                self.status_until = None;
            } else {
                self.status_until = Some(Instant::now() + Duration::from_secs(STATUS_MESSAGE_SECS));
            }
        }
    }
}

fn run_tui_notes<S: KeyValueStore>(controller: &mut NoteController<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut session = Session::new();

    let result = (|| -> Result<()> {
        loop {
            session.expire_status();

            terminal.draw(|f| {
                let quit_prompt = if session.quit_overlay {
                    Some(vec![
                        "Quit?".to_string(),
                        "".to_string(),
                        "[y] Yes   [n] No".to_string(),
                    ])
                } else {
                    None
                };
                let view = NoteViewState {
                    surfaces: controller.surfaces(),
                    scroll: controller.scroll(),
                    cursor: session.cursor_id(controller.surfaces()),
                    focus: session.focus,
                    status: session.status.clone(),
                    quit_overlay: quit_prompt,
                };
                session.hits = draw_notes(f, &view);
            })?;

            if event::poll(Duration::from_millis(200))? {
                let previous_status = session.status.clone();
                match event::read()? {
                    Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        match handle_key(key_event, controller, &mut session) {
                            Flow::Quit => break,
                            Flow::OpenEditor => {
                                let current = controller.surfaces().overlay.text.clone();
                                match edit_text_with_editor(&current, &mut terminal)? {
                                    Some(updated) => {
                                        controller.overlay_mut().text = updated;
                                        session.focus = Focus::OverlayText;
                                    }
                                    None => session.status = "Editor cancelled".into(),
                                }
                            }
                            Flow::Continue => {}
                        }
                    }
                    Event::Mouse(mouse_event) => {
                        handle_mouse(mouse_event, controller, &mut session)
                    }
                    _ => {}
                }
                session.track_status(&previous_status);
            }
        }
        Ok(())
    })();

    teardown_terminal(&mut terminal);
    result
}

fn handle_mouse<S: KeyValueStore>(
    mouse: MouseEvent,
    controller: &mut NoteController<S>,
    session: &mut Session,
) {
    // The quit confirmation is modal for the pointer too.
    if session.quit_overlay {
        return;
    }
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let hit = session.hits.hit_test(mouse.column, mouse.row);
            hover(hit, controller, session);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = session.hits.hit_test(mouse.column, mouse.row);
            session.focus = focus_for(&hit.target);
            if let Some(id) = hit.target.card_id() {
                if let Some(pos) = controller.surfaces().grid.iter().position(|c| c.id == id) {
                    session.cursor = pos;
                }
            }
            controller.dispatch(UiEvent::Click(hit));
        }
        MouseEventKind::ScrollDown => scroll_by(1, controller, session),
        MouseEventKind::ScrollUp => scroll_by(-1, controller, session),
        _ => {}
    }
    settle(controller, session);
}

/// Brings focus, popup and scroll back in line with the surfaces after an event.
fn settle<S: KeyValueStore>(controller: &mut NoteController<S>, session: &mut Session) {
    session.sync_focus(controller.surfaces());

    let surfaces = controller.surfaces();
    if surfaces.overlay.open && surfaces.popup.display.is_visible() {
        session.key_hover = None;
        let over_popup = session.hovered.as_ref().is_some_and(|hit| {
            hit.target.in_popup()
                || matches!(
                    hit.target,
                    Target::Card {
                        part: CardPart::ColorIcon,
                        ..
                    }
                )
        });
        if over_popup {
            session.hovered = None;
        }
        let popup = Hit::new(Target::Popup, Bounds::default());
        controller.dispatch(UiEvent::MouseOut(popup));
    }

    clamp_scroll(controller, session);
}

fn clamp_scroll<S: KeyValueStore>(controller: &mut NoteController<S>, session: &Session) {
    let max = max_scroll(
        controller.surfaces().grid.len(),
        session.hits.columns,
        session.hits.grid_area.height,
    );
    let scroll = controller.scroll();
    if scroll.y > max {
        controller.set_scroll(ScrollOffset { x: scroll.x, y: max });
    }
}

/// Turns pointer motion into leave/enter pairs whenever the target changes.
fn hover<S: KeyValueStore>(hit: Hit, controller: &mut NoteController<S>, session: &mut Session) {
    if session.hovered.as_ref().map(|h| &h.target) == Some(&hit.target) {
        return;
    }
    if let Some(previous) = session.hovered.take() {
        controller.dispatch(UiEvent::MouseOut(previous));
    }
    controller.dispatch(UiEvent::MouseOver(hit.clone()));
    session.hovered = Some(hit);
}

fn focus_for(target: &Target) -> Focus {
    match target {
        Target::Form(FormPart::TitleInput) => Focus::FormTitle,
        Target::Form(_) => Focus::FormText,
        Target::Overlay(OverlayPart::TitleField) => Focus::OverlayTitle,
        Target::Overlay(OverlayPart::TextField) => Focus::OverlayText,
        _ => Focus::None,
    }
}

fn scroll_by<S: KeyValueStore>(delta: i32, controller: &mut NoteController<S>, session: &Session) {
    let max = max_scroll(
        controller.surfaces().grid.len(),
        session.hits.columns,
        session.hits.grid_area.height,
    );
    let current = controller.scroll();
    let y = (i32::from(current.y) + delta).clamp(0, i32::from(max)) as u16;
    controller.set_scroll(ScrollOffset { x: current.x, y });
}

fn move_cursor<S: KeyValueStore>(
    delta: isize,
    controller: &mut NoteController<S>,
    session: &mut Session,
) {
    let len = controller.surfaces().grid.len();
    if len == 0 {
        return;
    }
    let next = (session.cursor.min(len - 1) as isize + delta).clamp(0, len as isize - 1);
    session.cursor = next as usize;
    let scroll = controller.scroll();
    let y = scroll_into_view(
        session.cursor,
        session.hits.columns,
        scroll.y,
        session.hits.grid_area.height,
    );
    controller.set_scroll(ScrollOffset { x: scroll.x, y });
}

fn handle_key<S: KeyValueStore>(
    key: KeyEvent,
    controller: &mut NoteController<S>,
    session: &mut Session,
) -> Flow {
    if session.quit_overlay {
        match key.code {
            KeyCode::Char('y') => return Flow::Quit,
            KeyCode::Char('n') | KeyCode::Esc => session.quit_overlay = false,
            _ => {}
        }
        return Flow::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let flow = match session.focus {
        Focus::FormTitle | Focus::FormText => {
            handle_form_key(key.code, ctrl, controller, session);
            Flow::Continue
        }
        Focus::OverlayTitle | Focus::OverlayText => {
            handle_overlay_key(key.code, ctrl, controller, session)
        }
        Focus::None if controller.surfaces().popup.display.is_visible() => {
            handle_popup_key(key.code, controller, session);
            Flow::Continue
        }
        Focus::None => {
            handle_grid_key(key.code, controller, session);
            Flow::Continue
        }
    };
    settle(controller, session);
    flow
}

fn handle_form_key<S: KeyValueStore>(
    key: KeyCode,
    ctrl: bool,
    controller: &mut NoteController<S>,
    session: &mut Session,
) {
    let on_title = session.focus == Focus::FormTitle;
    match key {
        KeyCode::Esc => {
            let outside = Hit::new(Target::Outside, Bounds::default());
            controller.dispatch(UiEvent::Click(outside));
        }
        KeyCode::Char('s') if ctrl => controller.dispatch(UiEvent::Submit),
        KeyCode::Enter if on_title => controller.dispatch(UiEvent::Submit),
        KeyCode::Enter => controller.form_mut().text.push('\n'),
        KeyCode::Tab | KeyCode::BackTab => {
            session.focus = if on_title { Focus::FormText } else { Focus::FormTitle };
        }
        KeyCode::Backspace => {
            let form = controller.form_mut();
            if on_title {
                form.title.pop();
            } else {
                form.text.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            let form = controller.form_mut();
            if on_title {
                form.title.push(c);
            } else {
                form.text.push(c);
            }
        }
        _ => {}
    }
}

fn handle_overlay_key<S: KeyValueStore>(
    key: KeyCode,
    ctrl: bool,
    controller: &mut NoteController<S>,
    session: &mut Session,
) -> Flow {
    let on_title = session.focus == Focus::OverlayTitle;
    match key {
        KeyCode::Esc => {
            let close = session.hit_for(Target::OverlayClose);
            controller.dispatch(UiEvent::Click(close));
        }
        KeyCode::Char('e') if ctrl => return Flow::OpenEditor,
        KeyCode::Tab | KeyCode::BackTab => {
            session.focus = if on_title {
                Focus::OverlayText
            } else {
                Focus::OverlayTitle
            };
        }
        KeyCode::Enter if on_title => session.focus = Focus::OverlayText,
        KeyCode::Enter => controller.overlay_mut().text.push('\n'),
        KeyCode::Backspace => {
            let overlay = controller.overlay_mut();
            if on_title {
                overlay.title.pop();
            } else {
                overlay.text.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            let overlay = controller.overlay_mut();
            if on_title {
                overlay.title.push(c);
            } else {
                overlay.text.push(c);
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_popup_key<S: KeyValueStore>(
    key: KeyCode,
    controller: &mut NoteController<S>,
    session: &mut Session,
) {
    let leave = |session: &mut Session| {
        session
            .key_hover
            .take()
            .unwrap_or_else(|| Hit::new(Target::Popup, Bounds::default()))
    };
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let digit = c.to_digit(10).unwrap_or_default() as usize;
            let Some(token) = swatch_token((digit + 9) % 10) else {
                return;
            };
            let swatch = session.hit_for(Target::Swatch(token.to_string()));
            controller.dispatch(UiEvent::Click(swatch));
            controller.dispatch(UiEvent::MouseOut(leave(session)));
        }
        KeyCode::Esc => controller.dispatch(UiEvent::MouseOut(leave(session))),
        _ => {}
    }
}

fn handle_grid_key<S: KeyValueStore>(
    key: KeyCode,
    controller: &mut NoteController<S>,
    session: &mut Session,
) {
    let columns = session.hits.columns.max(1) as isize;
    match key {
        KeyCode::Esc | KeyCode::Char('q') => session.quit_overlay = true,
        KeyCode::Left => move_cursor(-1, controller, session),
        KeyCode::Right => move_cursor(1, controller, session),
        KeyCode::Up => move_cursor(-columns, controller, session),
        KeyCode::Down => move_cursor(columns, controller, session),
        KeyCode::PageDown => {
            let page = i32::from(session.hits.grid_area.height);
            scroll_by(page, controller, session)
        }
        KeyCode::PageUp => {
            let page = i32::from(session.hits.grid_area.height);
            scroll_by(-page, controller, session)
        }
        KeyCode::Enter => {
            if let Some(hit) = session.card_hit(controller.surfaces(), CardPart::Body) {
                controller.dispatch(UiEvent::Click(hit));
            }
        }
        KeyCode::Char('d') => {
            if let Some(hit) = session.card_hit(controller.surfaces(), CardPart::DeleteIcon) {
                controller.dispatch(UiEvent::Click(hit));
            }
        }
        KeyCode::Char('c') => {
            if let Some(hit) = session.card_hit(controller.surfaces(), CardPart::ColorIcon) {
                controller.dispatch(UiEvent::MouseOver(hit.clone()));
                session.key_hover = Some(hit);
                session.status = "1-9, 0 pick a color | Esc cancel".into();
            }
        }
        KeyCode::Char('n') => {
            let input = session.hit_for(Target::Form(FormPart::TextInput));
            controller.dispatch(UiEvent::Click(input));
            session.focus = Focus::FormText;
        }
        KeyCode::Char('y') => {
            let Some(id) = session.cursor_id(controller.surfaces()) else {
                return;
            };
            if let Some(card) = controller.surfaces().card(id) {
                match copy_note_to_clipboard(&card.text) {
                    Ok(_) => session.status = "Copied note text to clipboard for 20s".into(),
                    Err(e) => {
                        warn!("{e}");
                        session.status = format!("Clipboard error: {e}");
                    }
                }
            }
        }
        _ => {}
    }
}

fn edit_text_with_editor(text: &str, terminal: &mut Tui) -> Result<Option<String>> {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, Show).ok();

    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(file.path()).status();

    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture, Hide).ok();
    enable_raw_mode().ok();
    terminal.clear()?;

    let status = status.map_err(|e| anyhow!("Failed to launch editor {editor}: {e}"))?;
    if !status.success() {
        return Ok(None);
    }

    let mut edited = fs::read_to_string(file.path())?;
    if edited.ends_with('\n') && !text.ends_with('\n') {
        edited.pop();
    }
    Ok(Some(edited))
}

fn teardown_terminal(terminal: &mut Tui) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        Show
    )
    .ok();
    terminal.show_cursor().ok();
}

#[cfg(debug_assertions)]
fn run_self_check(data_dir: &Path) -> Result<()> {
    let mut warnings = 0u32;
    let mut failures = 0u32;

    println!("Notes self-check (development build)");
    println!("Data directory: {}", data_dir.display());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(data_dir)?.permissions().mode() & 0o777;
        if mode == 0o700 {
            println!("[PASS] Data directory permissions are 0o700");
        } else {
            println!("[WARN] Data directory permissions are {:o}, expected 700", mode);
            warnings += 1;
        }
    }

    let store = FileStore::new(storage_path(data_dir));
    if !store.path().exists() {
        println!("[WARN] Storage file does not exist yet: {}", store.path().display());
        warnings += 1;
    } else {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path())?.permissions().mode() & 0o777;
            if mode == 0o600 {
                println!("[PASS] Storage file permissions are 0o600");
            } else {
                println!("[WARN] Storage file permissions are {:o}, expected 600", mode);
                warnings += 1;
            }
        }

        match store.get_item(crate::storage::NOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => {
                    println!("[PASS] Stored notes parse ({} note(s))", notes.len());
                    let mut ids: Vec<u64> = notes.iter().map(|n| n.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    if ids.len() == notes.len() {
                        println!("[PASS] Note ids are unique");
                    } else {
                        println!("[FAIL] Duplicate note ids found");
                        failures += 1;
                    }
                }
                Err(e) => {
                    println!("[FAIL] Stored notes are not valid: {e}");
                    failures += 1;
                }
            },
            Ok(None) => {
                println!("[WARN] No notes stored yet");
                warnings += 1;
            }
            Err(e) => {
                println!("[FAIL] Storage file is invalid: {e}");
                failures += 1;
            }
        }
    }

    println!("Self-check complete: {failures} failure(s), {warnings} warning(s).");
    if failures > 0 {
        Err(anyhow!("Self-check failed"))
    } else {
        Ok(())
    }
}

fn print_usage(bin_name: &str) {
    eprintln!("Usage: {bin_name} [OPTIONS]");
    eprintln!("  -l, --list              Print stored notes and exit");
    eprintln!("  -t, --text <PATH>       Import a text file as a note");
    eprintln!("      --data-dir <PATH>   Use another data directory for this run");
    eprintln!("      --set-data-dir <PATH>  Remember a data directory");
    #[cfg(debug_assertions)]
    eprintln!("      --self-check        Run integrity checks");
    eprintln!("  -V, --version           Show version and exit");
    eprintln!("  -h, --help              Show this help");
}

fn executable_name() -> String {
    let fallback = "notes".to_string();
    let arg0 = match std::env::args().next() {
        Some(v) => v,
        None => return fallback,
    };
    let path = Path::new(&arg0);
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback,
    }
}
