/// Screen rectangle of the element an event landed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && column < self.x.saturating_add(self.width)
            && row < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPart {
    Container,
    TitleInput,
    TextInput,
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPart {
    Body,
    Title,
    Text,
    ColorIcon,
    DeleteIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPart {
    Backdrop,
    TitleField,
    TextField,
}

/// Element an event is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Form(FormPart),
    FormClose,
    Card { id: u64, part: CardPart },
    Overlay(OverlayPart),
    OverlayClose,
    Popup,
    Swatch(String),
    Placeholder,
    Outside,
}

impl Target {
    pub fn in_form(&self) -> bool {
        matches!(self, Target::Form(_) | Target::FormClose)
    }

    /// Id of the card containing this target.
    pub fn card_id(&self) -> Option<u64> {
        match self {
            Target::Card { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn in_popup(&self) -> bool {
        matches!(self, Target::Popup | Target::Swatch(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub target: Target,
    pub bounds: Bounds,
}

impl Hit {
    pub fn new(target: Target, bounds: Bounds) -> Self {
        Self { target, bounds }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(Hit),
    MouseOver(Hit),
    MouseOut(Hit),
    Submit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}
