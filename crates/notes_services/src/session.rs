use anyhow::Result;
use notes_core::Note;
use notes_listing::{CategoryFilter, ListEvent};
use notes_store::StorageBackend;
use notes_workflow::{CreationWizard, WorkflowEvent};
use tracing::debug;

use crate::{NoteServices, Notice};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    List,
    Creating(CreationWizard),
    Detail(Note),
}

/// What the user is looking at. The selected tab survives opening a note's
/// detail but resets to the default tab once a new note is created or
/// abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    default_filter: CategoryFilter,
    filter: CategoryFilter,
    screen: Screen,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on `filter`, typically `listing.default_filter` from config.
    pub fn with_default_filter(filter: CategoryFilter) -> Self {
        Self {
            default_filter: filter,
            filter,
            screen: Screen::List,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The wizard being filled in, if the creation form is open.
    pub fn wizard_mut(&mut self) -> Option<&mut CreationWizard> {
        match &mut self.screen {
            Screen::Creating(wizard) => Some(wizard),
            _ => None,
        }
    }

    pub fn visible_notes<B: StorageBackend>(&self, services: &NoteServices<B>) -> Vec<Note> {
        services.list(self.filter)
    }

    pub fn handle_list_event<B: StorageBackend>(
        &mut self,
        services: &NoteServices<B>,
        event: ListEvent,
    ) {
        match event {
            ListEvent::CreateClicked => self.screen = Screen::Creating(CreationWizard::new()),
            ListEvent::NoteClicked(id) => match services.find_note(&id) {
                Some(note) => self.screen = Screen::Detail(note),
                None => debug!(note_id = %id, "clicked note no longer stored"),
            },
        }
    }

    /// Runs `step` on the open wizard. A commit or cancel is applied to the
    /// store and closes the form; any other outcome keeps it open.
    pub fn drive_wizard<B, F>(
        &mut self,
        services: &NoteServices<B>,
        step: F,
    ) -> Result<Option<Notice>>
    where
        B: StorageBackend,
        F: FnOnce(CreationWizard) -> Result<WorkflowEvent, CreationWizard>,
    {
        let Screen::Creating(wizard) = std::mem::take(&mut self.screen) else {
            return Ok(None);
        };

        match step(wizard) {
            Ok(event) => {
                self.filter = self.default_filter;
                services.commit(event)
            }
            Err(wizard) => {
                self.screen = Screen::Creating(wizard);
                Ok(None)
            }
        }
    }

    pub fn close_detail(&mut self) {
        if matches!(self.screen, Screen::Detail(_)) {
            self.screen = Screen::List;
        }
    }

    pub fn delete_selected<B: StorageBackend>(
        &mut self,
        services: &NoteServices<B>,
    ) -> Result<Option<Notice>> {
        let Screen::Detail(note) = &self.screen else {
            return Ok(None);
        };
        let notice = services.delete_note(&note.id)?;
        self.screen = Screen::List;
        Ok(Some(notice))
    }
}
