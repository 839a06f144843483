use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use arboard::Clipboard;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::events::{Bounds, CardPart, FormPart, Hit, OverlayPart, ScrollOffset, Target};
use crate::palette::{self, SWATCHES};
use crate::surface::{CardView, Display, Surfaces};

const CLIPBOARD_LIFETIME_SECS: u64 = 20;
pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 8;
pub const CARD_GAP: u16 = 1;
const FORM_WIDTH: u16 = 60;
const OVERLAY_WIDTH: u16 = 60;
const OVERLAY_HEIGHT: u16 = 14;
const COLOR_ICON: &str = "[●]";
const DELETE_ICON: &str = "[×]";
const CLOSE_BUTTON: &str = "[ Close ]";
const COLOR_SAND: Color = Color::Rgb(0xEB, 0xDB, 0xB2);
const COLOR_FOCUS: Color = Color::Rgb(0x1A, 0x73, 0xE8);
const COLOR_CARD_EDGE: Color = Color::Rgb(0xDA, 0xDC, 0xE0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    FormTitle,
    FormText,
    OverlayTitle,
    OverlayText,
}

#[derive(Clone, Copy)]
struct OverlayTheme {
    border: Color,
    title: Color,
    text: Color,
    bg: Color,
}

#[derive(Clone, Copy)]
enum OverlayKind {
    EditNote,
    ConfirmQuit,
}

impl OverlayKind {
    fn title(self) -> &'static str {
        match self {
            OverlayKind::EditNote => "Edit note",
            OverlayKind::ConfirmQuit => "Confirm quit",
        }
    }

    fn theme(self) -> OverlayTheme {
        match self {
            OverlayKind::EditNote => OverlayTheme {
                border: COLOR_FOCUS,
                title: palette::INK,
                text: palette::INK,
                bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            },
            OverlayKind::ConfirmQuit => OverlayTheme {
                border: Color::Rgb(0xA7, 0xA2, 0x36),
                title: Color::Rgb(0xE6, 0xD8, 0xB2),
                text: COLOR_SAND,
                bg: Color::Rgb(0x25, 0x24, 0x13),
            },
        }
    }
}

pub struct NoteViewState<'a> {
    pub surfaces: &'a Surfaces,
    pub scroll: ScrollOffset,
    pub cursor: Option<u64>,
    pub focus: Focus,
    pub status: String,
    pub quit_overlay: Option<Vec<String>>,
}

/// Screen regions recorded while drawing, topmost last.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<Hit>,
    pub grid_area: Rect,
    pub columns: u16,
}

impl HitMap {
    fn push(&mut self, target: Target, rect: Rect) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push(Hit::new(target, to_bounds(rect)));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        self.regions
            .iter()
            .rev()
            .find(|hit| hit.bounds.contains(column, row))
            .cloned()
            .unwrap_or_else(|| Hit::new(Target::Outside, Bounds::new(column, row, 1, 1)))
    }

    pub fn find(&self, target: &Target) -> Option<&Hit> {
        self.regions.iter().rev().find(|hit| &hit.target == target)
    }
}

fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.width, rect.height)
}

pub fn grid_columns(width: u16) -> u16 {
    (width.saturating_add(CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1)
}

/// Vertical distance between the tops of two card rows.
const ROW_STEP: u32 = (CARD_HEIGHT + CARD_GAP) as u32;

/// Card position relative to the top-left of the (unscrolled) grid. Rows are
/// counted in `u32` and saturate, so huge collections never overflow.
pub fn card_origin(index: usize, columns: u16) -> (u16, u32) {
    let columns = usize::from(columns.max(1));
    let col = (index % columns) as u16;
    let row = u32::try_from(index / columns).unwrap_or(u32::MAX);
    (
        col.saturating_mul(CARD_WIDTH + CARD_GAP),
        row.saturating_mul(ROW_STEP),
    )
}

pub fn grid_height(count: usize, columns: u16) -> u32 {
    let rows = u32::try_from(count.div_ceil(usize::from(columns.max(1)))).unwrap_or(u32::MAX);
    rows.saturating_mul(ROW_STEP).saturating_sub(u32::from(CARD_GAP))
}

pub fn max_scroll(count: usize, columns: u16, viewport_height: u16) -> u16 {
    let max = grid_height(count, columns).saturating_sub(u32::from(viewport_height));
    u16::try_from(max).unwrap_or(u16::MAX)
}

/// Smallest scroll change that shows the whole card at `index`.
pub fn scroll_into_view(index: usize, columns: u16, scroll: u16, viewport_height: u16) -> u16 {
    let (_, top) = card_origin(index, columns);
    let bottom = top.saturating_add(u32::from(CARD_HEIGHT));
    let scroll = u32::from(scroll);
    let next = if top < scroll {
        top
    } else if bottom > scroll + u32::from(viewport_height) {
        bottom.saturating_sub(u32::from(viewport_height))
    } else {
        scroll
    };
    u16::try_from(next).unwrap_or(u16::MAX)
}

fn centered_overlay_area(frame_size: Rect, lines: &[String]) -> Rect {
    let maxw = lines.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u16 + 4;
    let maxh = lines.len() as u16 + 2;
    Rect::new(
        (frame_size.width.saturating_sub(maxw)) / 2,
        (frame_size.height.saturating_sub(maxh)) / 2,
        maxw.min(frame_size.width),
        maxh.min(frame_size.height),
    )
}

fn render_overlay(f: &mut Frame<'_>, lines: &[String], kind: OverlayKind) {
    let area = centered_overlay_area(f.size(), lines);
    let theme = kind.theme();
    let paragraph = Paragraph::new(
        lines
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect::<Vec<Line>>(),
    )
    .style(Style::default().fg(theme.text).bg(theme.bg))
    .block(themed_block(kind.title(), theme));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn themed_block(title: &str, theme: OverlayTheme) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(
            Style::default()
                .fg(theme.border)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(theme.bg))
}

pub fn draw_notes(f: &mut Frame<'_>, state: &NoteViewState) -> HitMap {
    let mut hits = HitMap::default();
    let form = &state.surfaces.form;
    let form_height = if form.open {
        let title_rows = if form.title_display.is_visible() { 3 } else { 0 };
        let button_rows = if form.buttons_display.is_visible() { 1 } else { 0 };
        title_rows + 4 + button_rows
    } else {
        3
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    draw_grid(f, state, layout[1], &mut hits);
    draw_form(f, state, layout[0], &mut hits);

    let footer = Paragraph::new(state.status.clone()).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, layout[2]);

    if state.surfaces.popup.display.is_visible() {
        draw_popup(f, state, &mut hits);
    }

    if state.surfaces.overlay.open {
        draw_note_overlay(f, state, &mut hits);
    }

    if let Some(lines) = &state.quit_overlay {
        render_overlay(f, lines, OverlayKind::ConfirmQuit);
    }

    hits
}

fn draw_form(f: &mut Frame<'_>, state: &NoteViewState, area: Rect, hits: &mut HitMap) {
    let form = &state.surfaces.form;
    let width = FORM_WIDTH.min(area.width);
    let panel = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
    hits.push(Target::Form(FormPart::Container), panel);

    let mut y = panel.y;
    if form.title_display.is_visible() {
        let rect = Rect::new(panel.x, y, panel.width, 3);
        input_box(f, rect, "Title", &form.title, state.focus == Focus::FormTitle);
        hits.push(Target::Form(FormPart::TitleInput), rect);
        y += 3;
    }

    let text_height = if form.open { 4 } else { 3 };
    let rect = Rect::new(panel.x, y, panel.width, text_height.min(area.height));
    let label = if form.open { "Note" } else { "Take a note..." };
    input_box(f, rect, label, &form.text, state.focus == Focus::FormText);
    hits.push(Target::Form(FormPart::TextInput), rect);
    y += rect.height;

    if form.buttons_display.is_visible() && y < panel.y + panel.height {
        let row = Rect::new(panel.x, y, panel.width, 1);
        hits.push(Target::Form(FormPart::Buttons), row);
        let close_width = CLOSE_BUTTON.chars().count() as u16;
        let close = Rect::new(
            row.x + row.width.saturating_sub(close_width),
            row.y,
            close_width.min(row.width),
            1,
        );
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Ctrl+S", key_style),
                Span::raw(" save  "),
                Span::styled("Tab", key_style),
                Span::raw(" switch field"),
            ])),
            row,
        );
        f.render_widget(
            Paragraph::new(CLOSE_BUTTON).style(Style::default().add_modifier(Modifier::BOLD)),
            close,
        );
        hits.push(Target::FormClose, close);
    }
}

fn input_box(f: &mut Frame<'_>, rect: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(COLOR_FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let inner_height = usize::from(rect.height.saturating_sub(2));
    let lines: Vec<&str> = value.split('\n').collect();
    // Only the tail that fits is drawn.
    let skipped = lines.len().saturating_sub(inner_height.max(1));
    let paragraph = Paragraph::new(lines[skipped..].join("\n"))
        .block(Block::default().borders(Borders::ALL).title(label).border_style(border));
    f.render_widget(paragraph, rect);

    if focused && inner_height > 0 {
        let last = lines.last().map_or(0, |l| l.chars().count());
        let row = (lines.len() - 1 - skipped).min(inner_height - 1) as u16;
        let col = last.min(usize::from(rect.width.saturating_sub(3))) as u16;
        f.set_cursor(rect.x + 1 + col, rect.y + 1 + row);
    }
}

fn draw_grid(f: &mut Frame<'_>, state: &NoteViewState, area: Rect, hits: &mut HitMap) {
    let cards = &state.surfaces.grid;
    let columns = grid_columns(area.width);
    hits.grid_area = area;
    hits.columns = columns;

    if state.surfaces.placeholder != Display::None {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from("Notes you add appear here").bold(),
            Line::from("n: new note   Esc: quit").dark_gray(),
        ])
        .alignment(Alignment::Center);
        f.render_widget(placeholder, area);
        hits.push(Target::Placeholder, area);
    }

    let scroll = u32::from(state.scroll.y);
    let viewport_end = scroll + u32::from(area.height);
    let width = CARD_WIDTH.min(area.width);
    for (index, card) in cards.iter().enumerate() {
        let (x, y) = card_origin(index, columns);
        if y >= viewport_end {
            break;
        }
        if y < scroll || y + u32::from(CARD_HEIGHT) > viewport_end {
            continue;
        }
        let rect = Rect::new(area.x + x, area.y + (y - scroll) as u16, width, CARD_HEIGHT);
        if rect.x + rect.width > area.x + area.width {
            continue;
        }
        draw_card(f, card, rect, state.cursor == Some(card.id), hits);
    }
}

fn draw_card(
    f: &mut Frame<'_>,
    card: &CardView,
    rect: Rect,
    under_cursor: bool,
    hits: &mut HitMap,
) {
    let edge = if under_cursor {
        Style::default().fg(COLOR_FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_CARD_EDGE)
    };
    let paper = Style::default()
        .bg(palette::background(&card.background))
        .fg(palette::INK);
    f.render_widget(
        Block::default().borders(Borders::ALL).border_style(edge).style(paper),
        rect,
    );
    hits.push(
        Target::Card {
            id: card.id,
            part: CardPart::Body,
        },
        rect,
    );

    let inner = Rect::new(
        rect.x + 1,
        rect.y + 1,
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    );
    let title_rect = Rect::new(inner.x, inner.y, inner.width, 1);
    let text_rect = Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(2));
    let toolbar_y = inner.y + inner.height.saturating_sub(1);

    let title_style = if card.title_class.is_some() {
        paper.add_modifier(Modifier::BOLD)
    } else {
        paper
    };
    f.render_widget(Paragraph::new(card.title.as_str()).style(title_style), title_rect);
    f.render_widget(
        Paragraph::new(card.text.as_str())
            .style(paper)
            .wrap(Wrap { trim: false }),
        text_rect,
    );
    hits.push(
        Target::Card {
            id: card.id,
            part: CardPart::Title,
        },
        title_rect,
    );
    hits.push(
        Target::Card {
            id: card.id,
            part: CardPart::Text,
        },
        text_rect,
    );

    let icon_width = COLOR_ICON.chars().count() as u16;
    if inner.width >= icon_width * 2 + 1 {
        let color_rect = Rect::new(inner.x, toolbar_y, icon_width, 1);
        let delete_rect = Rect::new(inner.x + icon_width + 1, toolbar_y, icon_width, 1);
        f.render_widget(Paragraph::new(COLOR_ICON).style(paper), color_rect);
        f.render_widget(Paragraph::new(DELETE_ICON).style(paper), delete_rect);
        hits.push(
            Target::Card {
                id: card.color_icon_id,
                part: CardPart::ColorIcon,
            },
            color_rect,
        );
        hits.push(
            Target::Card {
                id: card.id,
                part: CardPart::DeleteIcon,
            },
            delete_rect,
        );
    }
}

/// Popup rectangle on screen: its document position minus the current scroll,
/// pushed back inside the frame.
pub fn popup_area(frame: Rect, left: u16, top: u16, scroll: ScrollOffset) -> Rect {
    let width = (SWATCHES.len() as u16 * 3 + 2).min(frame.width);
    let height = 3u16.min(frame.height);
    let x = left.saturating_sub(scroll.x).min(frame.width - width);
    let y = top.saturating_sub(scroll.y).min(frame.height - height);
    Rect::new(x, y, width, height)
}

fn draw_popup(f: &mut Frame<'_>, state: &NoteViewState, hits: &mut HitMap) {
    let popup = &state.surfaces.popup;
    let area = popup_area(f.size(), popup.left, popup.top, state.scroll);
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_CARD_EDGE))
            .style(Style::default().bg(Color::Rgb(0xFF, 0xFF, 0xFF))),
        area,
    );
    hits.push(Target::Popup, area);

    for (index, (token, color)) in SWATCHES.iter().enumerate() {
        let x = area.x + 1 + index as u16 * 3;
        if x + 3 > area.x + area.width.saturating_sub(1) || area.height < 3 {
            break;
        }
        let rect = Rect::new(x, area.y + 1, 3, 1);
        let label = format!(" {} ", (index + 1) % 10);
        f.render_widget(
            Paragraph::new(label).style(Style::default().bg(*color).fg(palette::INK)),
            rect,
        );
        hits.push(Target::Swatch((*token).to_string()), rect);
    }
}

fn draw_note_overlay(f: &mut Frame<'_>, state: &NoteViewState, hits: &mut HitMap) {
    let frame = f.size();
    hits.push(Target::Overlay(OverlayPart::Backdrop), frame);

    let width = OVERLAY_WIDTH.min(frame.width);
    let height = OVERLAY_HEIGHT.min(frame.height);
    let area = Rect::new(
        (frame.width - width) / 2,
        (frame.height - height) / 2,
        width,
        height,
    );
    let kind = OverlayKind::EditNote;
    f.render_widget(Clear, area);
    f.render_widget(themed_block(kind.title(), kind.theme()), area);
    if area.height < 8 || area.width < 12 {
        return;
    }

    let overlay = &state.surfaces.overlay;
    let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);
    let title_rect = Rect::new(inner.x, inner.y, inner.width, 3);
    let text_rect = Rect::new(inner.x, inner.y + 3, inner.width, inner.height - 4);
    let buttons = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);

    input_box(f, title_rect, "Title", &overlay.title, state.focus == Focus::OverlayTitle);
    input_box(f, text_rect, "Note", &overlay.text, state.focus == Focus::OverlayText);
    hits.push(Target::Overlay(OverlayPart::TitleField), title_rect);
    hits.push(Target::Overlay(OverlayPart::TextField), text_rect);

    f.render_widget(
        Paragraph::new("Tab switch field  Ctrl+E $EDITOR  Esc close")
            .style(Style::default().fg(Color::DarkGray)),
        buttons,
    );
    let close_width = CLOSE_BUTTON.chars().count() as u16;
    let close = Rect::new(
        buttons.x + buttons.width.saturating_sub(close_width),
        buttons.y,
        close_width.min(buttons.width),
        1,
    );
    f.render_widget(
        Paragraph::new(CLOSE_BUTTON).style(
            Style::default()
                .fg(COLOR_FOCUS)
                .add_modifier(Modifier::BOLD),
        ),
        close,
    );
    hits.push(Target::OverlayClose, close);
}

pub fn copy_note_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {e}"))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| anyhow!("Failed to set clipboard: {e}"))?;
    let mut clip = clipboard;
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(CLIPBOARD_LIFETIME_SECS));
        let _ = clip.set_text(String::new());
    });
    Ok(())
}
