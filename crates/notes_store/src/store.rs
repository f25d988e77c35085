use notes_core::{Note, NoteId};
use tracing::{debug, warn};

use crate::{StorageBackend, StoreError};

/// Key of the single bucket holding every note.
pub const STORAGE_KEY: &str = "step-notes-app";

/// Note collection persisted as one JSON array under [`STORAGE_KEY`].
///
/// Every mutation reads the whole document, edits it in memory and writes it
/// back. Two writers sharing a backend (two processes on one file, say) can
/// lose each other's updates; guarding against that needs a version check on
/// write, which this store does not do.
pub struct NoteStore<B> {
    backend: B,
}

impl<B: StorageBackend> NoteStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored notes in insertion order. Missing, blank or unreadable
    /// documents all come back as an empty list.
    pub fn list_all(&self) -> Vec<Note> {
        match self.load() {
            Ok(notes) => notes,
            Err(err) => {
                warn!(error = %err, "failed to load notes bucket");
                Vec::new()
            }
        }
    }

    /// Mutations load through here so a bucket that cannot be read is never
    /// overwritten.
    fn load(&self) -> Result<Vec<Note>, StoreError> {
        let Some(raw) = self.backend.read(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn find(&self, id: &NoteId) -> Option<Note> {
        self.list_all().into_iter().find(|note| &note.id == id)
    }

    /// Appends without checking for an existing note with the same id.
    pub fn append(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.load()?;
        if notes.iter().any(|existing| existing.id == note.id) {
            warn!(note_id = %note.id, "appending note with an id that is already stored");
        }
        debug!(note_id = %note.id, "appending note");
        notes.push(note);
        self.write_all(&notes)
    }

    pub fn replace(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.load()?;
        let Some(slot) = notes.iter_mut().find(|existing| existing.id == note.id) else {
            debug!(note_id = %note.id, "replace skipped, note not found");
            return Ok(());
        };
        *slot = note;
        self.write_all(&notes)
    }

    pub fn remove(&self, id: &NoteId) -> Result<(), StoreError> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            debug!(note_id = %id, "remove skipped, note not found");
            return Ok(());
        }
        self.write_all(&notes)
    }

    fn write_all(&self, notes: &[Note]) -> Result<(), StoreError> {
        let document = serde_json::to_string(notes)?;
        self.backend.write(STORAGE_KEY, &document)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use notes_core::Category;
    use tempfile::tempdir;

    use super::*;
    use crate::{FileBackend, MemoryBackend, SqliteBackend};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap()
    }

    fn note(id: &str, title: &str) -> Note {
        Note::new(NoteId::new(id), title, Category::Work, ["body"], at(0))
    }

    fn memory_store() -> NoteStore<MemoryBackend> {
        NoteStore::new(MemoryBackend::new())
    }

    #[test]
    fn fresh_store_lists_nothing() {
        assert!(memory_store().list_all().is_empty());
    }

    #[test]
    fn appended_note_round_trips() {
        let store = memory_store();
        let n = note("a", "first");
        store.append(n.clone()).expect("append");
        assert_eq!(store.list_all(), vec![n]);
    }

    #[test]
    fn append_keeps_insertion_order_and_allows_duplicate_ids() {
        let store = memory_store();
        store.append(note("a", "1")).expect("append a");
        store.append(note("b", "2")).expect("append b");
        store.append(note("a", "3")).expect("append dup");

        let titles: Vec<_> = store.list_all().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["1", "2", "3"]);
    }

    #[test]
    fn replace_swaps_only_the_matching_entry() {
        let store = memory_store();
        for (id, title) in [("a", "1"), ("b", "2"), ("c", "3")] {
            store.append(note(id, title)).expect("append");
        }

        let mut edited = note("b", "two");
        edited.touch(at(5));
        store.replace(edited.clone()).expect("replace");

        let notes = store.list_all();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0], note("a", "1"));
        assert_eq!(notes[1], edited);
        assert_eq!(notes[2], note("c", "3"));
    }

    #[test]
    fn replace_of_unknown_id_is_a_noop() {
        let store = memory_store();
        store.append(note("a", "1")).expect("append");
        store.replace(note("zzz", "ghost")).expect("replace");
        assert_eq!(store.list_all(), vec![note("a", "1")]);
    }

    #[test]
    fn remove_drops_only_the_matching_entry() {
        let store = memory_store();
        store.append(note("a", "1")).expect("append a");
        store.append(note("b", "2")).expect("append b");

        store.remove(&NoteId::new("a")).expect("remove");
        assert_eq!(store.list_all(), vec![note("b", "2")]);

        store.remove(&NoteId::new("missing")).expect("remove missing");
        assert_eq!(store.list_all(), vec![note("b", "2")]);
    }

    #[test]
    fn remove_on_absent_bucket_does_not_create_it() {
        let store = memory_store();
        store.remove(&NoteId::new("a")).expect("remove");
        assert_eq!(store.backend().read(STORAGE_KEY).expect("read"), None);
    }

    #[test]
    fn corrupt_or_blank_documents_read_as_empty() {
        let store = memory_store();
        store
            .backend()
            .write(STORAGE_KEY, "{not json")
            .expect("write garbage");
        assert!(store.list_all().is_empty());

        store.backend().write(STORAGE_KEY, "  ").expect("write blank");
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn mutations_refuse_to_overwrite_a_corrupt_bucket() {
        let store = memory_store();
        store.append(note("a", "1")).expect("append");
        let garbage = r#"[{"id":"a","title":"1"#;
        store.backend().write(STORAGE_KEY, garbage).expect("write garbage");

        assert!(matches!(store.append(note("b", "2")), Err(StoreError::Json(_))));
        assert!(store.replace(note("a", "edited")).is_err());
        assert!(store.remove(&NoteId::new("a")).is_err());
        assert_eq!(
            store.backend().read(STORAGE_KEY).expect("read").as_deref(),
            Some(garbage)
        );
    }

    #[test]
    fn unreadable_file_bucket_is_left_untouched() {
        let dir = tempdir().expect("tempdir");
        let store = NoteStore::new(FileBackend::new(dir.path()));
        store.append(note("a", "kept")).expect("append a");
        store.append(note("b", "kept2")).expect("append b");

        let path = dir.path().join("step-notes-app.json");
        let mut bytes = std::fs::read(&path).expect("raw bytes");
        let offset = bytes
            .windows(5)
            .position(|w| w == b"kept2")
            .expect("title in document");
        bytes[offset + 4] = 0xFF;
        std::fs::write(&path, &bytes).expect("write invalid utf8");

        assert!(store.list_all().is_empty());
        assert!(matches!(store.append(note("c", "new")), Err(StoreError::Io { .. })));
        assert!(store.remove(&NoteId::new("a")).is_err());
        assert_eq!(std::fs::read(&path).expect("raw bytes"), bytes);
    }

    #[test]
    fn find_returns_first_match() {
        let store = memory_store();
        store.append(note("a", "1")).expect("append");
        assert_eq!(store.find(&NoteId::new("a")).map(|n| n.title), Some("1".to_string()));
        assert_eq!(store.find(&NoteId::new("b")), None);
    }

    #[test]
    fn file_store_survives_new_handle() {
        let dir = tempdir().expect("tempdir");
        NoteStore::new(FileBackend::new(dir.path()))
            .append(note("a", "kept"))
            .expect("append");

        let reopened = NoteStore::new(FileBackend::new(dir.path()));
        assert_eq!(reopened.list_all(), vec![note("a", "kept")]);

        let raw = std::fs::read_to_string(dir.path().join("step-notes-app.json")).expect("raw");
        assert!(raw.starts_with('['), "unexpected document: {raw}");
        assert!(raw.contains("\"updatedAt\":\"2024-05-01T09:00:00.000Z\""));
    }

    #[test]
    fn sqlite_store_survives_new_handle() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("notes.db");
        NoteStore::new(SqliteBackend::open(&path).expect("open"))
            .append(note("a", "kept"))
            .expect("append");

        let reopened = NoteStore::new(SqliteBackend::open(&path).expect("reopen"));
        assert_eq!(reopened.list_all(), vec![note("a", "kept")]);
    }
}
