//! Page coordinator: selection, list visibility and the unsaved-changes guard.
//!
//! [`PageState`] is a plain serializable value. It changes only through two
//! pure functions: [`reconcile`], which derives a [`PagePatch`] from a change
//! in the notes collection, and [`PageState::reduce`], which applies a user
//! [`PageAction`]. [`Page`] wires those functions to the list and editor.

use crate::domain::{Note, NoteId};
use crate::ui::editor::{EditorMode, EditorState};
use crate::ui::list::{ListEvent, ListItem, ListView};
use serde::{Deserialize, Serialize};

/// What the editor is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Selection {
    /// An existing note.
    Note(NoteId),
    /// A blank editor. Each reset gets a new number so that the editor is
    /// recreated even when it was already blank.
    Fresh(u64),
}

/// Selection change derived from a change in the notes collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// Select the given note (or nothing).
    Select(Option<NoteId>),
    /// Deselect and force a fresh editor.
    Reset,
}

/// Changes to apply to [`PageState`] after the notes collection changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagePatch {
    pub show_list: Option<bool>,
    pub selection: Option<SelectionChange>,
}

impl PagePatch {
    pub fn is_empty(&self) -> bool {
        self.show_list.is_none() && self.selection.is_none()
    }
}

/// User actions handled by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Show or hide the note list.
    ToggleList,
    /// Start a new, blank note.
    NewNote,
    /// Open an existing note.
    SelectNote(NoteId),
    /// Discard unsaved edits and continue to the pending selection.
    ProceedWarning,
    /// Keep editing; drop the pending selection.
    CancelWarning,
}

/// Page-level UI state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    selected: Option<Selection>,
    show_list: bool,
    show_warning: bool,
    pending: Option<Selection>,
    reset_counter: u64,
}

/// Derives the state changes caused by the notes collection going from
/// `prev_count` to `count` notes.
///
/// - The list opens when the collection stops being empty and closes when
///   it becomes empty.
/// - Growth selects `last_saved`, the note that was just created.
/// - Shrinkage resets the selection, whichever note was removed.
pub fn reconcile(
    prev_count: usize,
    count: usize,
    last_saved: Option<&NoteId>,
    state: &PageState,
) -> PagePatch {
    let mut patch = PagePatch::default();

    if state.show_list && count == 0 {
        patch.show_list = Some(false);
    } else if !state.show_list && prev_count == 0 && count > 0 {
        patch.show_list = Some(true);
    }

    if count > prev_count {
        patch.selection = Some(SelectionChange::Select(last_saved.cloned()));
    } else if count < prev_count {
        patch.selection = Some(SelectionChange::Reset);
    }

    patch
}

impl PageState {
    /// Returns the current selection.
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Returns the id of the selected note, if an existing note is selected.
    pub fn selected_note_id(&self) -> Option<&NoteId> {
        match &self.selected {
            Some(Selection::Note(id)) => Some(id),
            _ => None,
        }
    }

    pub fn show_list(&self) -> bool {
        self.show_list
    }

    /// Returns true while the unsaved-changes warning is open.
    pub fn show_warning(&self) -> bool {
        self.show_warning
    }

    /// Returns the selection waiting on the unsaved-changes warning.
    pub fn pending(&self) -> Option<&Selection> {
        self.pending.as_ref()
    }

    /// Returns true if the list is shown for a collection of `note_count`.
    pub fn is_list_visible(&self, note_count: usize) -> bool {
        note_count > 0 && self.show_list
    }

    /// Applies a patch produced by [`reconcile`].
    pub fn apply(&self, patch: PagePatch) -> PageState {
        let mut next = self.clone();
        if let Some(show_list) = patch.show_list {
            next.show_list = show_list;
        }
        match patch.selection {
            Some(SelectionChange::Select(id)) => next.selected = id.map(Selection::Note),
            Some(SelectionChange::Reset) => next.selected = Some(next.next_fresh()),
            None => {}
        }
        next
    }

    /// Applies a user action. `editor_dirty` reports whether the editor holds
    /// unsaved changes.
    ///
    /// Navigation actions are ignored while the warning is open.
    pub fn reduce(&self, action: &PageAction, editor_dirty: bool) -> PageState {
        let mut next = self.clone();
        match action {
            PageAction::ToggleList => {
                if !next.show_warning {
                    next.show_list = !next.show_list;
                }
            }
            PageAction::NewNote => {
                if !next.show_warning {
                    let target = next.next_fresh();
                    next.navigate(target, editor_dirty);
                }
            }
            PageAction::SelectNote(id) => {
                if !next.show_warning && next.selected_note_id() != Some(id) {
                    next.navigate(Selection::Note(id.clone()), editor_dirty);
                }
            }
            PageAction::ProceedWarning => {
                if next.show_warning {
                    next.show_warning = false;
                    next.selected = next.pending.take();
                }
            }
            PageAction::CancelWarning => {
                if next.show_warning {
                    next.show_warning = false;
                    next.pending = None;
                }
            }
        }
        next
    }

    fn navigate(&mut self, target: Selection, editor_dirty: bool) {
        if editor_dirty {
            self.show_warning = true;
            self.pending = Some(target);
        } else {
            self.selected = Some(target);
        }
    }

    fn next_fresh(&mut self) -> Selection {
        self.reset_counter += 1;
        Selection::Fresh(self.reset_counter)
    }
}

/// Coordinates the list and the editor for a collection of notes.
#[derive(Debug, Clone)]
pub struct Page {
    state: PageState,
    note_count: usize,
    editor: EditorState,
    list: ListView,
}

impl Page {
    /// Creates a page showing `notes`.
    pub fn new(notes: &[Note], last_saved: Option<&NoteId>) -> Self {
        let mut page = Self {
            state: PageState::default(),
            note_count: 0,
            editor: EditorState::default(),
            list: ListView::new(),
        };
        page.sync_notes(notes, last_saved);
        page
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    /// Returns the selected note from `notes`.
    pub fn selected_note<'a>(&self, notes: &'a [Note]) -> Option<&'a Note> {
        let id = self.state.selected_note_id()?;
        notes.iter().find(|n| n.id() == id)
    }

    /// Returns true if the list toggle is offered at all.
    pub fn is_list_button_visible(&self) -> bool {
        self.note_count > 0
    }

    pub fn is_list_visible(&self) -> bool {
        self.state.is_list_visible(self.note_count)
    }

    /// Returns the list rows for `notes`.
    pub fn list_items(&self, notes: &[Note]) -> Vec<ListItem> {
        self.list.items(notes, self.state.selected_note_id())
    }

    /// Reconciles the page with a new notes collection.
    pub fn sync_notes(&mut self, notes: &[Note], last_saved: Option<&NoteId>) {
        let patch = reconcile(self.note_count, notes.len(), last_saved, &self.state);
        let next = self.state.apply(patch);
        self.note_count = notes.len();
        self.transition(next, notes);
    }

    /// Handles a user action.
    pub fn dispatch(&mut self, action: PageAction, notes: &[Note]) {
        let next = self.state.reduce(&action, self.editor.has_text_changed());
        self.transition(next, notes);
    }

    /// Handles a click on a list row.
    pub fn select_from_list(&mut self, id: NoteId, notes: &[Note]) {
        let ListEvent::Select(id) = self.list.select(id);
        self.dispatch(PageAction::SelectNote(id), notes);
    }

    fn transition(&mut self, next: PageState, notes: &[Note]) {
        let selection_changed = next.selected != self.state.selected;
        self.state = next;

        let selected = self.selected_note(notes).cloned();
        if selection_changed {
            self.editor = EditorState::new(selected, EditorMode::Edit);
        } else {
            self.editor.refresh_note(selected);
        }
    }
}
