#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Details,
    MainContent,
    AdditionalDetails,
}

impl Step {
    pub const TOTAL: u8 = 3;

    pub fn number(self) -> u8 {
        match self {
            Step::Details => 1,
            Step::MainContent => 2,
            Step::AdditionalDetails => 3,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Details => Some(Step::MainContent),
            Step::MainContent => Some(Step::AdditionalDetails),
            Step::AdditionalDetails => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Details => None,
            Step::MainContent => Some(Step::Details),
            Step::AdditionalDetails => Some(Step::MainContent),
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Details => "Note Details",
            Step::MainContent => "Main Content",
            Step::AdditionalDetails => "Additional Details",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::Details => "Give your note a title and choose a category",
            Step::MainContent => "What's the most important thing to remember?",
            Step::AdditionalDetails => "Add more context or details to your note",
        }
    }
}

/// What the forward button does on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Save,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::Save => "Save Note",
        }
    }
}
