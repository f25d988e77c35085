use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use notes_core::{Category, Note, NoteId, ParseCategoryError};
use serde::{Deserialize, Serialize};

pub const PREVIEW_CHARS: usize = 100;
pub const EMPTY_VIEW_MESSAGE: &str = "No notes found in this category";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Tabs in display order: everything first, then each category.
    pub fn tabs() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.name(),
        }
    }

    pub fn matches(self, note: &Note) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => note.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Notes matching `filter`, most recently updated first. Equal timestamps
/// keep their order from `notes`.
pub fn view(notes: &[Note], filter: CategoryFilter) -> Vec<Note> {
    let mut shown: Vec<Note> = notes
        .iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect();
    shown.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    shown
}

/// Card text: paragraphs joined by spaces, cut to [`PREVIEW_CHARS`]
/// characters with a trailing ellipsis when cut.
pub fn preview(note: &Note) -> String {
    let joined = note.content.join(" ");
    let mut chars = joined.chars();
    let mut out: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const MINUTES_PER_MONTH: i64 = 30 * MINUTES_PER_DAY;
const MINUTES_PER_YEAR: i64 = 365 * MINUTES_PER_DAY;

/// How long ago `then` was, relative to `now`, in the card's wording
/// ("3 hours ago" reads as "about 3 hours ago"). Times after `now` read as
/// "in ...".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let minutes = (seconds.abs() + 30) / 60;

    let distance = match minutes {
        0 => "less than a minute".to_string(),
        1..45 => plural(minutes, "minute"),
        45..90 => "about 1 hour".to_string(),
        90..MINUTES_PER_DAY => format!(
            "about {}",
            plural(rounded(minutes, MINUTES_PER_HOUR), "hour")
        ),
        MINUTES_PER_DAY..2520 => "1 day".to_string(),
        2520..MINUTES_PER_MONTH => plural(rounded(minutes, MINUTES_PER_DAY), "day"),
        MINUTES_PER_MONTH..86_400 => format!(
            "about {}",
            plural(rounded(minutes, MINUTES_PER_MONTH), "month")
        ),
        86_400..MINUTES_PER_YEAR => plural(rounded(minutes, MINUTES_PER_MONTH), "month"),
        _ => format!("about {}", plural(minutes / MINUTES_PER_YEAR, "year")),
    };

    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn rounded(minutes: i64, unit: i64) -> i64 {
    (minutes + unit / 2) / unit
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    NoteClicked(NoteId),
    CreateClicked,
}
