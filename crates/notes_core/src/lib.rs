pub mod category;
pub mod id;
pub mod note;
pub mod timestamp;

pub use category::{Category, ParseCategoryError};
pub use id::{NoteId, generate_id};
pub use note::Note;
