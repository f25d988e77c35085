mod step;
mod wizard;

pub use step::{PrimaryAction, Step};
pub use wizard::{Advance, ContentSlot, CreationWizard, Draft, WorkflowEvent};
