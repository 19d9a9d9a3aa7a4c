//! UI state machines: list, editor, page coordinator and the application

pub mod app;
pub mod editor;
pub mod list;
pub mod page;

pub use app::App;
pub use editor::{EditorMode, EditorState, PLACEHOLDER};
pub use list::{EMPTY_MESSAGE, ListEvent, ListItem, ListView, SearchPattern};
pub use page::{
    Page, PageAction, PagePatch, PageState, Selection, SelectionChange, reconcile,
};
