use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use notes_config::{BackendKind, StorageConfig};
use notes_core::{Note, NoteId};
use notes_listing::{CategoryFilter, view};
use notes_store::{FileBackend, MemoryBackend, NoteStore, SqliteBackend, StorageBackend};
use notes_workflow::WorkflowEvent;
use tracing::info;

pub type DynNoteServices = NoteServices<Box<dyn StorageBackend>>;

/// Confirmation shown after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    pub const CREATED: Notice = Notice {
        title: "Note created",
        description: "Your note has been successfully created.",
    };

    pub const DELETED: Notice = Notice {
        title: "Note deleted",
        description: "Your note has been successfully deleted.",
    };
}

pub struct NoteServicesBuilder {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
}

impl NoteServicesBuilder {
    pub fn new(data_dir: impl Into<PathBuf>, backend: BackendKind) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(config.resolve_data_dir()?, config.backend))
    }

    pub fn build(self) -> Result<DynNoteServices> {
        let backend: Box<dyn StorageBackend> = match self.backend {
            BackendKind::File => Box::new(FileBackend::new(&self.data_dir)),
            BackendKind::Sqlite => {
                let path = self.data_dir.join("notes.db");
                Box::new(
                    SqliteBackend::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?,
                )
            }
            BackendKind::Memory => Box::new(MemoryBackend::new()),
        };
        info!(backend = ?self.backend, data_dir = %self.data_dir.display(), "note storage ready");
        Ok(NoteServices::new(NoteStore::new(backend)))
    }
}

/// Entry points the presentation layer calls. Every read goes back to the
/// store; nothing is cached here.
pub struct NoteServices<B> {
    store: NoteStore<B>,
}

impl<B: StorageBackend> NoteServices<B> {
    pub fn new(store: NoteStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }

    pub fn get_notes(&self) -> Vec<Note> {
        self.store.list_all()
    }

    pub fn find_note(&self, id: &NoteId) -> Option<Note> {
        self.store.find(id)
    }

    pub fn list(&self, filter: CategoryFilter) -> Vec<Note> {
        view(&self.get_notes(), filter)
    }

    pub fn save_note(&self, note: Note) -> Result<Notice> {
        let note_id = note.id.clone();
        self.store
            .append(note)
            .with_context(|| format!("failed to save note {note_id}"))?;
        info!(note_id = %note_id, "note created");
        Ok(Notice::CREATED)
    }

    /// Stamps `updated_at` with the current time before replacing.
    pub fn update_note(&self, mut note: Note) -> Result<()> {
        note.touch(Utc::now());
        let note_id = note.id.clone();
        self.store
            .replace(note)
            .with_context(|| format!("failed to update note {note_id}"))?;
        info!(note_id = %note_id, "note updated");
        Ok(())
    }

    pub fn delete_note(&self, id: &NoteId) -> Result<Notice> {
        self.store
            .remove(id)
            .with_context(|| format!("failed to delete note {id}"))?;
        info!(note_id = %id, "note deleted");
        Ok(Notice::DELETED)
    }

    pub fn generate_id(&self) -> NoteId {
        notes_core::generate_id()
    }

    /// Applies the wizard's completion event.
    pub fn commit(&self, event: WorkflowEvent) -> Result<Option<Notice>> {
        match event {
            WorkflowEvent::Saved(note) => self.save_note(note).map(Some),
            WorkflowEvent::Cancelled => Ok(None),
        }
    }
}
