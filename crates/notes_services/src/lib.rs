mod services;
mod session;

pub use services::{DynNoteServices, NoteServices, NoteServicesBuilder, Notice};
pub use session::{Screen, Session};
