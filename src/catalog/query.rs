//! Fixed GraphQL queries sent to AniList.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// AniList media season.
///
/// Seasons follow AniList's convention: WINTER covers December to February,
/// and December counts towards the following year's WINTER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl MediaSeason {
    /// GraphQL enum literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
        }
    }
}

impl FromStr for MediaSeason {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WINTER" => Ok(Self::Winter),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            "FALL" | "AUTUMN" => Ok(Self::Fall),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MediaSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season + year filter for the weekly-top chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonFilter {
    pub season: MediaSeason,
    pub year: i32,
}

impl SeasonFilter {
    /// The airing season a calendar date falls into.
    pub fn for_date(date: NaiveDate) -> Self {
        let (season, year) = match date.month() {
            12 => (MediaSeason::Winter, date.year() + 1),
            1 | 2 => (MediaSeason::Winter, date.year()),
            3..=5 => (MediaSeason::Spring, date.year()),
            6..=8 => (MediaSeason::Summer, date.year()),
            _ => (MediaSeason::Fall, date.year()),
        };
        Self { season, year }
    }
}

/// One of the fixed chart queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chart {
    /// Highest score of all time.
    Top,
    /// Currently trending.
    Trending,
    /// Most popular in one season.
    WeeklyTop(SeasonFilter),
}

impl Chart {
    fn sort(&self) -> &'static str {
        match self {
            Self::Top => "SCORE_DESC",
            Self::Trending => "TRENDING_DESC",
            Self::WeeklyTop(_) => "POPULARITY_DESC",
        }
    }

    /// Render the GraphQL document for this chart.
    pub fn to_graphql(&self) -> String {
        let season = match self {
            Self::WeeklyTop(filter) => {
                format!(", season: {}, seasonYear: {}", filter.season, filter.year)
            }
            _ => String::new(),
        };

        format!(
            r#"
{{
  Page {{
    media(sort: {sort}, type: ANIME{season}) {{
      title {{
        romaji
        english
      }}
      id
    }}
  }}
}}
"#,
            sort = self.sort(),
            season = season,
        )
    }
}

/// Lookup of a single anime by AniList id.
pub fn media_by_id(id: i64) -> String {
    format!(
        r#"
{{
  Media(id: {id}, type: ANIME) {{
    title {{
      romaji
      english
    }}
    id
  }}
}}
"#
    )
}
