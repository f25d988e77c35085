use chrono::{DateTime, Utc};
use notes_core::{Category, Note, NoteId, generate_id};
use tracing::debug;

use crate::{PrimaryAction, Step};

/// Index into [`Draft::content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSlot {
    Main,
    DetailA,
    DetailB,
}

impl ContentSlot {
    fn index(self) -> usize {
        match self {
            ContentSlot::Main => 0,
            ContentSlot::DetailA => 1,
            ContentSlot::DetailB => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub category: Category,
    pub content: [String; 3],
}

impl Draft {
    pub fn content(&self, slot: ContentSlot) -> &str {
        &self.content[slot.index()]
    }
}

/// Three-step note creation form.
///
/// Transitions consume the wizard and hand back the next state, so a
/// committed draft cannot be saved twice. Nothing is persisted here; the
/// committed [`Note`] is passed to whoever drives the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationWizard {
    step: Step,
    draft: Draft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The current step is incomplete; state is unchanged.
    Blocked(CreationWizard),
    Moved(CreationWizard),
    Committed(Note),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    Saved(Note),
    Cancelled,
}

impl CreationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft.category = category;
    }

    pub fn set_content(&mut self, slot: ContentSlot, text: impl Into<String>) {
        self.draft.content[slot.index()] = text.into();
    }

    pub fn is_step_valid(&self) -> bool {
        match self.step {
            Step::Details => !self.draft.title.trim().is_empty(),
            Step::MainContent => !self.draft.content(ContentSlot::Main).trim().is_empty(),
            Step::AdditionalDetails => true,
        }
    }

    pub fn can_retreat(&self) -> bool {
        self.step.previous().is_some()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.step.is_last() {
            PrimaryAction::Save
        } else {
            PrimaryAction::Next
        }
    }

    pub fn advance(self, now: DateTime<Utc>, id: NoteId) -> Advance {
        if !self.is_step_valid() {
            debug!(step = self.step.number(), "advance blocked, step incomplete");
            return Advance::Blocked(self);
        }

        match self.step.next() {
            Some(step) => Advance::Moved(Self { step, ..self }),
            None => {
                let Draft {
                    title,
                    category,
                    content,
                } = self.draft;
                let note = Note::new(id, title, category, content, now);
                debug!(note_id = %note.id, paragraphs = note.content.len(), "draft committed");
                Advance::Committed(note)
            }
        }
    }

    /// [`advance`](Self::advance) with the wall clock and a fresh id.
    pub fn advance_now(self) -> Advance {
        self.advance(Utc::now(), generate_id())
    }

    pub fn retreat(self) -> Self {
        match self.step.previous() {
            Some(step) => Self { step, ..self },
            None => self,
        }
    }

    pub fn cancel(self) -> WorkflowEvent {
        WorkflowEvent::Cancelled
    }
}

impl Advance {
    /// Folds a commit into the wizard's completion event, leaving unfinished
    /// states as the wizard to keep showing.
    pub fn into_event(self) -> Result<WorkflowEvent, CreationWizard> {
        match self {
            Advance::Committed(note) => Ok(WorkflowEvent::Saved(note)),
            Advance::Blocked(wizard) | Advance::Moved(wizard) => Err(wizard),
        }
    }
}
