//! AniList response models.

use serde::Deserialize;

/// Anime titles as returned by AniList.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaTitle {
    pub romaji: String,
    #[serde(default)]
    pub english: Option<String>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Media {
    pub id: i64,
    pub title: MediaTitle,
}

impl Media {
    /// The English title when AniList has one.
    pub fn english_title(&self) -> Option<&str> {
        self.title.english.as_deref().filter(|t| !t.is_empty())
    }

    /// Preferred display title: English if known, else romaji.
    pub fn display_title(&self) -> &str {
        self.english_title().unwrap_or(&self.title.romaji)
    }
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageData {
    #[serde(rename = "Page")]
    pub page: Option<Page>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page {
    pub media: Option<Vec<Media>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaData {
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}
