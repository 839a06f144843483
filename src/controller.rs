use log::{debug, error, info};

use crate::events::{CardPart, Hit, ScrollOffset, Target, UiEvent};
use crate::models::{next_id, Note, Selection, DEFAULT_COLOR};
use crate::storage::{load_notes, save_notes, KeyValueStore};
use crate::surface::{
    placeholder_display, render_cards, Display, FormSurface, OverlaySurface, Surfaces,
};

/// Owns the note collection and the state of every surface the notes are shown on.
///
/// Events go in through [`NoteController::dispatch`]; the terminal layer reads
/// [`NoteController::surfaces`] back to draw. Every mutation persists the whole
/// collection and rebuilds the grid.
pub struct NoteController<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
    selection: Selection,
    surfaces: Surfaces,
    scroll: ScrollOffset,
}

impl<S: KeyValueStore> NoteController<S> {
    pub fn new(store: S) -> Self {
        let notes = load_notes(&store);
        info!("Loaded {} note(s)", notes.len());
        let mut controller = Self {
            store,
            notes,
            selection: Selection::default(),
            surfaces: Surfaces::default(),
            scroll: ScrollOffset::default(),
        };
        controller.render();
        controller
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[cfg(test)]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn form_mut(&mut self) -> &mut FormSurface {
        &mut self.surfaces.form
    }

    pub fn overlay_mut(&mut self) -> &mut OverlaySurface {
        &mut self.surfaces.overlay
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click(hit) => self.click(&hit),
            UiEvent::MouseOver(hit) => self.mouse_over(&hit),
            UiEvent::MouseOut(hit) => self.mouse_out(&hit),
            UiEvent::Submit => self.submit(),
        }
    }

    fn click(&mut self, hit: &Hit) {
        // Handlers bound to the target itself run before the document-wide chain.
        match &hit.target {
            Target::FormClose => {
                // Stops propagation.
                self.close_form();
                return;
            }
            Target::OverlayClose => self.close_modal(),
            Target::Swatch(color) if !color.is_empty() => self.edit_note_color(color),
            _ => {}
        }

        self.handle_form_click(&hit.target);
        self.select_note(&hit.target);
        self.open_modal(&hit.target);
        self.delete_note(&hit.target);
    }

    fn mouse_over(&mut self, hit: &Hit) {
        if hit.target.in_popup() {
            self.surfaces.popup.display = Display::Flex;
        }
        self.open_tooltip(hit);
    }

    fn mouse_out(&mut self, hit: &Hit) {
        if hit.target.in_popup() {
            self.surfaces.popup.display = Display::None;
        }
        self.close_tooltip(hit);
    }

    fn submit(&mut self) {
        if self.surfaces.form.has_note() {
            let title = self.surfaces.form.title.clone();
            let text = self.surfaces.form.text.clone();
            self.add_note(title, text);
        }
    }

    fn handle_form_click(&mut self, target: &Target) {
        if target.in_form() {
            self.open_form();
        } else if self.surfaces.form.has_note() {
            let title = self.surfaces.form.title.clone();
            let text = self.surfaces.form.text.clone();
            self.add_note(title, text);
        } else {
            self.close_form();
        }
    }

    fn open_form(&mut self) {
        let form = &mut self.surfaces.form;
        form.open = true;
        form.title_display = Display::Block;
        form.buttons_display = Display::Block;
    }

    fn close_form(&mut self) {
        let form = &mut self.surfaces.form;
        form.open = false;
        form.title_display = Display::None;
        form.buttons_display = Display::None;
        form.title.clear();
        form.text.clear();
    }

    /// Captures id, title and text from the rendered card under the target.
    fn select_note(&mut self, target: &Target) {
        let Some(id) = target.card_id() else {
            return;
        };
        let Some(card) = self.surfaces.card(id) else {
            return;
        };
        self.selection = Selection {
            id: Some(card.id),
            title: card.title.clone(),
            text: card.text.clone(),
        };
    }

    fn open_modal(&mut self, target: &Target) {
        if let Target::Card {
            part: CardPart::DeleteIcon,
            ..
        } = target
        {
            return;
        }
        let Some(id) = target.card_id() else {
            return;
        };
        if self.surfaces.card(id).is_none() {
            return;
        }
        let overlay = &mut self.surfaces.overlay;
        overlay.open = !overlay.open;
        overlay.title = self.selection.title.clone();
        overlay.text = self.selection.text.clone();
    }

    fn close_modal(&mut self) {
        self.edit_note();
        self.surfaces.overlay.open = !self.surfaces.overlay.open;
    }

    fn open_tooltip(&mut self, hit: &Hit) {
        let Target::Card {
            id,
            part: CardPart::ColorIcon,
        } = hit.target
        else {
            return;
        };
        self.selection.id = Some(id);

        let popup = &mut self.surfaces.popup;
        popup.left = hit.bounds.x.saturating_add(self.scroll.x);
        popup.top = hit.bounds.bottom().saturating_add(self.scroll.y);
        popup.display = Display::Flex;
    }

    fn close_tooltip(&mut self, hit: &Hit) {
        if let Target::Card {
            part: CardPart::ColorIcon,
            ..
        } = hit.target
        {
            self.surfaces.popup.display = Display::None;
        }
    }

    fn add_note(&mut self, title: String, text: String) {
        let note = Note {
            title,
            text,
            color: DEFAULT_COLOR.to_string(),
            id: next_id(&self.notes),
        };
        debug!("Adding note {}", note.id);
        self.notes.push(note);
        self.render();
        self.close_form();
    }

    fn edit_note(&mut self) {
        let title = self.surfaces.overlay.title.clone();
        let text = self.surfaces.overlay.text.clone();
        if let Some(note) = self.selected_note_mut() {
            debug!("Editing note {}", note.id);
            note.title = title;
            note.text = text;
        }
        self.render();
    }

    fn edit_note_color(&mut self, color: &str) {
        if let Some(note) = self.selected_note_mut() {
            debug!("Coloring note {} {color}", note.id);
            note.color = color.to_string();
        }
        self.render();
    }

    fn delete_note(&mut self, target: &Target) {
        let Target::Card {
            id,
            part: CardPart::DeleteIcon,
        } = *target
        else {
            return;
        };
        if self.surfaces.card(id).is_none() {
            return;
        }
        debug!("Deleting note {id}");
        self.notes.retain(|note| note.id != id);
        self.render();
    }

    fn selected_note_mut(&mut self) -> Option<&mut Note> {
        let id = self.selection.id?;
        self.notes.iter_mut().find(|note| note.id == id)
    }

    fn render(&mut self) {
        self.save_notes();
        self.display_notes();
    }

    fn save_notes(&mut self) {
        if let Err(e) = save_notes(&mut self.store, &self.notes) {
            error!("Failed to save notes: {e}");
        }
    }

    fn display_notes(&mut self) {
        self.surfaces.placeholder = placeholder_display(&self.notes);
        self.surfaces.grid = render_cards(&self.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Bounds, FormPart, OverlayPart};
    use crate::storage::{MemoryStore, NOTES_KEY};

    fn controller() -> NoteController<MemoryStore> {
        NoteController::new(MemoryStore::default())
    }

    fn seeded(notes: &[Note]) -> NoteController<MemoryStore> {
        let mut store = MemoryStore::default();
        save_notes(&mut store, notes).unwrap();
        NoteController::new(store)
    }

    fn note(id: u64, title: &str, text: &str, color: &str) -> Note {
        Note {
            title: title.into(),
            text: text.into(),
            color: color.into(),
            id,
        }
    }

    fn click(c: &mut NoteController<MemoryStore>, target: Target) {
        c.dispatch(UiEvent::Click(Hit::new(target, Bounds::default())));
    }

    fn card(id: u64, part: CardPart) -> Target {
        Target::Card { id, part }
    }

    fn create(c: &mut NoteController<MemoryStore>, title: &str, text: &str) {
        click(c, Target::Form(FormPart::TextInput));
        c.form_mut().title = title.into();
        c.form_mut().text = text.into();
        c.dispatch(UiEvent::Submit);
    }

    fn hover_color_icon(c: &mut NoteController<MemoryStore>, id: u64, bounds: Bounds) {
        c.dispatch(UiEvent::MouseOver(Hit::new(card(id, CardPart::ColorIcon), bounds)));
    }

    fn reloaded(c: &NoteController<MemoryStore>) -> Vec<Note> {
        load_notes(c.store())
    }

    #[test]
    fn starts_empty_with_placeholder_and_persists_on_init() {
        let c = controller();
        assert!(c.notes().is_empty());
        assert_eq!(c.surfaces().placeholder, Display::Flex);
        assert_eq!(c.store().items.get(NOTES_KEY).map(String::as_str), Some("[]"));
    }

    #[test]
    fn malformed_storage_starts_empty() {
        let mut store = MemoryStore::default();
        store.items.insert(NOTES_KEY.into(), "{oops".into());
        let c = NoteController::new(store);
        assert!(c.notes().is_empty());
        assert_eq!(c.store().items.get(NOTES_KEY).map(String::as_str), Some("[]"));
    }

    #[test]
    fn submitting_a_title_creates_the_first_note() {
        let mut c = controller();
        create(&mut c, "A", "");

        assert_eq!(c.notes(), &[note(1, "A", "", "white")]);
        assert_eq!(c.surfaces().placeholder, Display::None);
        assert_eq!(c.surfaces().grid.len(), 1);
        assert!(!c.surfaces().form.open);
        assert!(c.surfaces().form.title.is_empty());
        assert_eq!(reloaded(&c), c.notes());
    }

    #[test]
    fn submitting_an_empty_form_adds_nothing() {
        let mut c = seeded(&[note(1, "a", "", "white")]);
        create(&mut c, "", "");
        assert_eq!(c.notes().len(), 1);
    }

    #[test]
    fn ids_increase_across_creations() {
        let mut c = controller();
        create(&mut c, "", "first");
        create(&mut c, "second", "x");
        let ids: Vec<u64> = c.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn new_ids_exceed_every_remaining_id() {
        let mut c = seeded(&[note(2, "a", "", "white"), note(9, "b", "", "white")]);
        click(&mut c, card(2, CardPart::DeleteIcon));
        create(&mut c, "c", "");
        assert_eq!(c.notes().last().map(|n| n.id), Some(10));
    }

    #[test]
    fn clicking_inside_the_form_opens_it() {
        let mut c = controller();
        click(&mut c, Target::Form(FormPart::TextInput));
        let form = &c.surfaces().form;
        assert!(form.open);
        assert_eq!(form.title_display, Display::Block);
        assert_eq!(form.buttons_display, Display::Block);
    }

    #[test]
    fn clicking_outside_commits_a_form_with_content() {
        let mut c = controller();
        click(&mut c, Target::Form(FormPart::TextInput));
        c.form_mut().text = "remember".into();
        click(&mut c, Target::Outside);

        assert_eq!(c.notes(), &[note(1, "", "remember", "white")]);
        assert!(!c.surfaces().form.open);
        assert!(c.surfaces().form.text.is_empty());
    }

    #[test]
    fn clicking_outside_closes_an_empty_form() {
        let mut c = controller();
        click(&mut c, Target::Form(FormPart::TextInput));
        click(&mut c, Target::Placeholder);

        let form = &c.surfaces().form;
        assert!(!form.open);
        assert_eq!(form.title_display, Display::None);
        assert!(c.notes().is_empty());
    }

    #[test]
    fn form_close_control_discards_content() {
        let mut c = seeded(&[note(1, "a", "b", "white")]);
        click(&mut c, Target::Form(FormPart::TitleInput));
        c.form_mut().title = "draft".into();
        click(&mut c, Target::FormClose);

        assert_eq!(c.notes().len(), 1);
        assert!(!c.surfaces().form.open);
        assert!(c.surfaces().form.title.is_empty());
    }

    #[test]
    fn clicking_a_card_opens_the_overlay_with_its_fields() {
        let mut c = seeded(&[note(1, "one", "first", "white"), note(2, "two", "second", "red")]);
        click(&mut c, card(2, CardPart::Text));

        assert_eq!(
            c.selection(),
            &Selection {
                id: Some(2),
                title: "two".into(),
                text: "second".into(),
            }
        );
        let overlay = &c.surfaces().overlay;
        assert!(overlay.open);
        assert_eq!(overlay.title, "two");
        assert_eq!(overlay.text, "second");
    }

    #[test]
    fn a_second_card_click_toggles_the_overlay_shut() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        click(&mut c, card(1, CardPart::Body));
        click(&mut c, card(1, CardPart::Body));
        assert!(!c.surfaces().overlay.open);
    }

    #[test]
    fn closing_the_overlay_edits_only_the_selected_note() {
        let mut c = seeded(&[note(1, "one", "a", "white"), note(2, "two", "b", "blue")]);
        click(&mut c, card(2, CardPart::Title));
        c.overlay_mut().title = "renamed".into();
        c.overlay_mut().text = "rewritten".into();
        click(&mut c, Target::OverlayClose);

        assert_eq!(
            c.notes(),
            &[note(1, "one", "a", "white"), note(2, "renamed", "rewritten", "blue")]
        );
        assert!(!c.surfaces().overlay.open);
        assert_eq!(c.surfaces().grid[1].title, "renamed");
        assert_eq!(reloaded(&c), c.notes());
    }

    #[test]
    fn editing_down_to_empty_keeps_the_note() {
        let mut c = seeded(&[note(1, "one", "a", "white")]);
        click(&mut c, card(1, CardPart::Body));
        c.overlay_mut().title.clear();
        c.overlay_mut().text.clear();
        click(&mut c, Target::OverlayClose);

        assert_eq!(c.notes().len(), 1);
        assert!(c.notes()[0].is_blank());
        assert_eq!(c.surfaces().grid[0].title_class, None);
    }

    #[test]
    fn overlay_backdrop_click_leaves_the_overlay_open() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        click(&mut c, card(1, CardPart::Body));
        click(&mut c, Target::Overlay(OverlayPart::Backdrop));
        assert!(c.surfaces().overlay.open);
    }

    #[test]
    fn deleting_removes_only_the_matching_note() {
        let mut c = seeded(&[
            note(1, "one", "a", "white"),
            note(2, "two", "b", "red"),
            note(3, "three", "c", "green"),
        ]);
        click(&mut c, card(2, CardPart::DeleteIcon));

        assert_eq!(
            c.notes(),
            &[note(1, "one", "a", "white"), note(3, "three", "c", "green")]
        );
        assert!(!c.surfaces().overlay.open);
        assert_eq!(reloaded(&c), c.notes());
    }

    #[test]
    fn deleting_still_captures_the_selection() {
        let mut c = seeded(&[note(1, "one", "a", "white")]);
        click(&mut c, card(1, CardPart::DeleteIcon));
        assert_eq!(c.selection().id, Some(1));
    }

    #[test]
    fn deleting_the_last_note_shows_the_placeholder() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        assert_eq!(c.surfaces().placeholder, Display::None);
        click(&mut c, card(1, CardPart::DeleteIcon));
        assert!(c.notes().is_empty());
        assert_eq!(c.surfaces().placeholder, Display::Flex);
    }

    #[test]
    fn delete_on_a_card_that_is_not_rendered_is_ignored() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        click(&mut c, card(5, CardPart::DeleteIcon));
        assert_eq!(c.notes().len(), 1);
    }

    #[test]
    fn hovering_a_color_icon_positions_the_popup_below_it() {
        let mut c = seeded(&[note(1, "one", "", "white"), note(2, "two", "", "white")]);
        c.set_scroll(ScrollOffset { x: 0, y: 4 });
        hover_color_icon(&mut c, 2, Bounds::new(30, 10, 3, 1));

        let popup = &c.surfaces().popup;
        assert_eq!(popup.display, Display::Flex);
        assert_eq!((popup.left, popup.top), (30, 15));
        assert_eq!(c.selection().id, Some(2));

        c.dispatch(UiEvent::MouseOut(Hit::new(
            card(2, CardPart::ColorIcon),
            Bounds::new(30, 10, 3, 1),
        )));
        assert_eq!(c.surfaces().popup.display, Display::None);
    }

    #[test]
    fn leaving_something_other_than_a_color_icon_keeps_the_popup() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        hover_color_icon(&mut c, 1, Bounds::new(0, 0, 3, 1));
        c.dispatch(UiEvent::MouseOut(Hit::new(card(1, CardPart::Text), Bounds::default())));
        assert_eq!(c.surfaces().popup.display, Display::Flex);
    }

    #[test]
    fn the_popup_stays_open_while_hovered() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        let icon = Bounds::new(0, 0, 3, 1);
        hover_color_icon(&mut c, 1, icon);
        c.dispatch(UiEvent::MouseOut(Hit::new(card(1, CardPart::ColorIcon), icon)));
        c.dispatch(UiEvent::MouseOver(Hit::new(
            Target::Swatch("red".into()),
            Bounds::new(0, 1, 3, 1),
        )));
        assert_eq!(c.surfaces().popup.display, Display::Flex);

        c.dispatch(UiEvent::MouseOut(Hit::new(Target::Popup, Bounds::default())));
        assert_eq!(c.surfaces().popup.display, Display::None);
    }

    #[test]
    fn clicking_a_swatch_recolors_only_the_selected_note() {
        let mut c = seeded(&[
            note(1, "one", "a", "white"),
            note(2, "two", "b", "white"),
            note(3, "three", "c", "yellow"),
        ]);
        hover_color_icon(&mut c, 2, Bounds::new(0, 0, 3, 1));
        click(&mut c, Target::Swatch("red".into()));

        assert_eq!(
            c.notes(),
            &[
                note(1, "one", "a", "white"),
                note(2, "two", "b", "red"),
                note(3, "three", "c", "yellow"),
            ]
        );
        let backgrounds: Vec<&str> = c
            .surfaces()
            .grid
            .iter()
            .map(|c| c.background.as_str())
            .collect();
        assert_eq!(backgrounds, vec!["white", "red", "yellow"]);
        assert_eq!(reloaded(&c), c.notes());
    }

    #[test]
    fn swatch_without_a_color_does_nothing() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        hover_color_icon(&mut c, 1, Bounds::default());
        click(&mut c, Target::Swatch(String::new()));
        assert_eq!(c.notes()[0].color, "white");
    }

    #[test]
    fn swatch_click_also_commits_a_pending_form() {
        let mut c = seeded(&[note(1, "one", "", "white")]);
        click(&mut c, Target::Form(FormPart::TextInput));
        c.form_mut().text = "pending".into();
        hover_color_icon(&mut c, 1, Bounds::default());
        click(&mut c, Target::Swatch("green".into()));

        assert_eq!(
            c.notes(),
            &[note(1, "one", "", "green"), note(2, "", "pending", "white")]
        );
    }

    #[test]
    fn hovering_a_color_icon_retargets_the_overlay_edit() {
        let mut c = seeded(&[note(1, "one", "a", "white"), note(2, "two", "b", "white")]);
        click(&mut c, card(1, CardPart::Body));
        hover_color_icon(&mut c, 2, Bounds::default());
        click(&mut c, Target::OverlayClose);

        assert_eq!(c.notes()[0], note(1, "one", "a", "white"));
        assert_eq!(c.notes()[1], note(2, "one", "a", "white"));
    }

    #[test]
    fn clicking_a_card_while_the_form_has_content_creates_first() {
        let mut c = seeded(&[note(1, "one", "a", "white")]);
        click(&mut c, Target::Form(FormPart::TextInput));
        c.form_mut().title = "new".into();
        click(&mut c, card(1, CardPart::Body));

        assert_eq!(c.notes().len(), 2);
        assert!(c.surfaces().overlay.open);
        assert_eq!(c.surfaces().overlay.title, "one");
    }
}
