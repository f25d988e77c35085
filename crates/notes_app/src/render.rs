use std::fmt::Write;

use chrono::{DateTime, Utc};
use notes_core::{Note, timestamp};
use notes_listing::{CategoryFilter, EMPTY_VIEW_MESSAGE, preview, relative_age};
use notes_workflow::{ContentSlot, CreationWizard, Step};

pub fn list(notes: &[Note], filter: CategoryFilter, now: DateTime<Utc>) -> String {
    let mut out = String::from("My Notes\n");
    let tabs: Vec<String> = CategoryFilter::tabs()
        .map(|tab| {
            if tab == filter {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    if notes.is_empty() {
        let _ = writeln!(out, "\n  {EMPTY_VIEW_MESSAGE}. Type `new` to create one.");
        return out;
    }

    for (index, note) in notes.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{:>3}. {}  <{}>\n     {}\n     Updated {}",
            index + 1,
            note.title,
            note.category,
            preview(note),
            relative_age(note.updated_at, now),
        );
    }
    out
}

pub fn detail(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", note.title);
    let _ = writeln!(
        out,
        "Category: {} | Last Updated: {}",
        note.category,
        timestamp::format(&note.updated_at)
    );
    for paragraph in &note.content {
        let _ = writeln!(out, "\n  {paragraph}");
    }
    out
}

pub fn wizard(wizard: &CreationWizard) -> String {
    let step = wizard.step();
    let draft = wizard.draft();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (step {} of {})\n{}",
        step.title(),
        step.number(),
        Step::TOTAL,
        step.description()
    );

    match step {
        Step::Details => {
            let _ = writeln!(out, "  title:    {}", draft.title);
            let _ = writeln!(out, "  category: {}", draft.category);
        }
        Step::MainContent => {
            let _ = writeln!(out, "  main:     {}", draft.content(ContentSlot::Main));
        }
        Step::AdditionalDetails => {
            let _ = writeln!(out, "  detail1:  {}", draft.content(ContentSlot::DetailA));
            let _ = writeln!(out, "  detail2:  {}", draft.content(ContentSlot::DetailB));
        }
    }

    let forward = if wizard.is_step_valid() {
        wizard.primary_action().label().to_string()
    } else {
        format!("{} (fill in the required field first)", wizard.primary_action().label())
    };
    let back = if wizard.can_retreat() { "back | " } else { "" };
    let _ = writeln!(out, "  [{back}next: {forward} | cancel]");
    out
}
