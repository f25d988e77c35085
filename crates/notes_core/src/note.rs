use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, NoteId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: Vec<String>,
    pub category: Category,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note stamped at `now`, dropping paragraphs that are blank
    /// after trimming.
    pub fn new<I, S>(
        id: NoteId,
        title: impl Into<String>,
        category: Category,
        paragraphs: I,
        now: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            title: title.into(),
            content: paragraphs
                .into_iter()
                .map(Into::into)
                .filter(|paragraph: &String| !paragraph.trim().is_empty())
                .collect(),
            category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
