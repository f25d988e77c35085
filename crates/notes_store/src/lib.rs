mod backend;
mod errors;
mod sqlite;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use errors::StoreError;
pub use sqlite::SqliteBackend;
pub use store::{NoteStore, STORAGE_KEY};
