//! Content-type filter applied to a search

use std::fmt;
use std::str::FromStr;

/// Which class of content a search is restricted to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Music,
    Software,
    EBooks,
}

impl Category {
    /// Every category, in picker order
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Music,
        Category::Software,
        Category::EBooks,
    ];

    /// Remote `entity` filter token, `None` for an unfiltered search
    pub fn entity(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Music => Some("musicTrack"),
            Category::Software => Some("software"),
            Category::EBooks => Some("ebook"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Music => "Music",
            Category::Software => "Software",
            Category::EBooks => "E-books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "music" => Ok(Category::Music),
            "software" => Ok(Category::Software),
            "ebooks" | "e-books" => Ok(Category::EBooks),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
