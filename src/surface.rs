use crate::models::Note;

pub const TITLE_CLASS: &str = "note-title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
    Block,
    None,
}

impl Display {
    pub fn is_visible(self) -> bool {
        self != Display::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSurface {
    /// `form-open` class.
    pub open: bool,
    pub title_display: Display,
    pub buttons_display: Display,
    pub title: String,
    pub text: String,
}

impl Default for FormSurface {
    fn default() -> Self {
        Self {
            open: false,
            title_display: Display::None,
            buttons_display: Display::None,
            title: String::new(),
            text: String::new(),
        }
    }
}

impl FormSurface {
    pub fn has_note(&self) -> bool {
        !self.title.is_empty() || !self.text.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySurface {
    /// `open-modal` class.
    pub open: bool,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPopup {
    pub display: Display,
    pub left: u16,
    pub top: u16,
}

impl Default for ColorPopup {
    fn default() -> Self {
        Self {
            display: Display::None,
            left: 0,
            top: 0,
        }
    }
}

/// One rendered note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u64,
    pub background: String,
    pub title: String,
    pub title_class: Option<&'static str>,
    pub text: String,
    /// Note id carried by the color icon.
    pub color_icon_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surfaces {
    pub placeholder: Display,
    pub form: FormSurface,
    pub grid: Vec<CardView>,
    pub overlay: OverlaySurface,
    pub popup: ColorPopup,
}

impl Default for Surfaces {
    fn default() -> Self {
        Self {
            placeholder: Display::Flex,
            form: FormSurface::default(),
            grid: Vec::new(),
            overlay: OverlaySurface::default(),
            popup: ColorPopup::default(),
        }
    }
}

impl Surfaces {
    pub fn card(&self, id: u64) -> Option<&CardView> {
        self.grid.iter().find(|card| card.id == id)
    }
}

pub fn render_card(note: &Note) -> CardView {
    CardView {
        id: note.id,
        background: note.color.clone(),
        title: note.title.clone(),
        title_class: (!note.title.is_empty()).then_some(TITLE_CLASS),
        text: note.text.clone(),
        color_icon_id: note.id,
    }
}

pub fn render_cards(notes: &[Note]) -> Vec<CardView> {
    notes.iter().map(render_card).collect()
}

pub fn placeholder_display(notes: &[Note]) -> Display {
    if notes.is_empty() {
        Display::Flex
    } else {
        Display::None
    }
}
