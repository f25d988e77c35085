use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Study,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_personal() {
        assert_eq!(Category::default(), Category::Personal);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("work".parse::<Category>(), Ok(Category::Work));
        assert_eq!(" Study ".parse::<Category>(), Ok(Category::Study));
        assert_eq!(
            "Hobby".parse::<Category>(),
            Err(ParseCategoryError("Hobby".to_string()))
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Other).expect("serialize");
        assert_eq!(json, "\"Other\"");
        let rejected = serde_json::from_str::<Category>("\"Hobby\"");
        assert!(rejected.is_err());
    }
}
