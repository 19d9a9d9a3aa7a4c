//! The application: a page wired to a note repository.

use crate::domain::{Note, NoteId};
use crate::index::{NoteRepository, RepositoryResult};
use crate::infra::KeyValueStore;
use crate::ui::editor::EditorMode;
use crate::ui::list::ListItem;
use crate::ui::page::{Page, PageAction};
use tracing::info;

/// Top-level application state.
///
/// Routes editor events into the repository and re-synchronises the page
/// with the notes collection after every change.
///
/// # Examples
///
/// ```
/// use notesmd::infra::MemoryStore;
/// use notesmd::ui::App;
///
/// let mut app = App::open(MemoryStore::new());
/// app.edit_text("# Groceries\nmilk");
/// let note = app.save().unwrap().expect("editor was dirty");
/// assert_eq!(app.notes().len(), 1);
/// assert_eq!(app.page().state().selected_note_id(), Some(note.id()));
/// ```
#[derive(Debug)]
pub struct App<S> {
    repository: NoteRepository<S>,
    notes: Vec<Note>,
    last_saved_note_id: Option<NoteId>,
    page: Page,
}

impl<S: KeyValueStore> App<S> {
    /// Loads the notes from `store` and builds the initial page.
    pub fn open(store: S) -> Self {
        let repository = NoteRepository::open(store);
        let notes = repository.notes();
        let page = Page::new(&notes, None);
        Self {
            repository,
            notes,
            last_saved_note_id: None,
            page,
        }
    }

    /// Returns all notes.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repository
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Returns the id of the most recently saved note.
    pub fn last_saved_note_id(&self) -> Option<&NoteId> {
        self.last_saved_note_id.as_ref()
    }

    /// Returns the list rows.
    pub fn list_items(&self) -> Vec<ListItem> {
        self.page.list_items(&self.notes)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.page.selected_note(&self.notes)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.page.list_mut().set_search_term(term);
    }

    /// Selects a note from the list.
    pub fn select_note(&mut self, id: NoteId) {
        self.page.select_from_list(id, &self.notes);
    }

    pub fn dispatch(&mut self, action: PageAction) {
        self.page.dispatch(action, &self.notes);
    }

    pub fn new_note(&mut self) {
        self.dispatch(PageAction::NewNote);
    }

    pub fn toggle_list(&mut self) {
        self.dispatch(PageAction::ToggleList);
    }

    pub fn proceed_warning(&mut self) {
        self.dispatch(PageAction::ProceedWarning);
    }

    pub fn cancel_warning(&mut self) {
        self.dispatch(PageAction::CancelWarning);
    }

    /// Replaces the editor buffer.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.page.editor_mut().set_text(text);
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.page.editor_mut().set_mode(mode);
    }

    /// Saves the editor buffer.
    ///
    /// Returns `Ok(None)` when saving is disabled (empty or unchanged text)
    /// or while the unsaved-changes warning is open.
    pub fn save(&mut self) -> RepositoryResult<Option<Note>> {
        if self.page.state().show_warning() {
            return Ok(None);
        }
        let Some(draft) = self.page.editor().save() else {
            return Ok(None);
        };

        let note = self.repository.save(draft)?;
        info!(id = %note.id(), "note saved");
        self.last_saved_note_id = Some(note.id().clone());
        self.sync();
        Ok(Some(note))
    }

    /// Opens the delete confirmation for the note in the editor.
    pub fn request_delete(&mut self) {
        if self.page.state().show_warning() {
            return;
        }
        self.page.editor_mut().request_delete();
    }

    pub fn cancel_delete(&mut self) {
        self.page.editor_mut().cancel_delete();
    }

    /// Deletes the note in the editor once the confirmation is open.
    ///
    /// Returns the deleted id, or `Ok(None)` if nothing was confirmed.
    pub fn confirm_delete(&mut self) -> RepositoryResult<Option<NoteId>> {
        if self.page.state().show_warning() {
            return Ok(None);
        }
        let Some(id) = self.page.editor_mut().confirm_delete() else {
            return Ok(None);
        };

        self.repository.delete(&id)?;
        info!(id = %id, "note deleted");
        self.last_saved_note_id = None;
        self.sync();
        Ok(Some(id))
    }

    fn sync(&mut self) {
        self.notes = self.repository.notes();
        self.page.sync_notes(&self.notes, self.last_saved_note_id.as_ref());
    }
}
