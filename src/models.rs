use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "white";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub id: u64,
}

impl Note {
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }
}

/// Note most recently clicked, or whose color icon was hovered.
///
/// Hovering only moves `id`; `title` and `text` keep whatever the last card
/// click captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub id: Option<u64>,
    pub title: String,
    pub text: String,
}

pub fn next_id(notes: &[Note]) -> u64 {
    notes.iter().map(|n| n.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u64) -> Note {
        Note {
            title: format!("t{id}"),
            text: String::new(),
            color: default_color(),
            id,
        }
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn next_id_follows_the_largest_id() {
        assert_eq!(next_id(&[note(3), note(7), note(5)]), 8);
    }

    #[test]
    fn missing_color_defaults_to_white() {
        let parsed: Note = serde_json::from_str(r#"{"title":"a","text":"b","id":4}"#).unwrap();
        assert_eq!(parsed.color, "white");
        assert_eq!(parsed.id, 4);
    }

    #[test]
    fn serializes_with_stored_field_order() {
        let raw = serde_json::to_string(&note(2)).unwrap();
        assert_eq!(raw, r#"{"title":"t2","text":"","color":"white","id":2}"#);
    }
}
