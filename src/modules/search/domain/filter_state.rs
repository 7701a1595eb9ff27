use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::modules::show::ShowStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Upstream order, untouched
    #[default]
    Relevance,
    RatingDesc,
    NameAsc,
    YearDesc,
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "rating" | "rating_desc" | "rating-desc" => Ok(SortKey::RatingDesc),
            "name" | "name_asc" | "name-asc" => Ok(SortKey::NameAsc),
            "year" | "year_desc" | "year-desc" => Ok(SortKey::YearDesc),
            _ => Err(()),
        }
    }
}

/// Client-side filters applied on top of the raw result set. `None` means
/// the filter is off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub genre: Option<String>,
    pub status: Option<ShowStatus>,
    pub channel: Option<String>,
    pub favorites_only: bool,
    pub sort: SortKey,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Empty strings from UI selects mean "any"
    pub fn normalized(mut self) -> Self {
        self.genre = self.genre.filter(|g| !g.trim().is_empty());
        self.channel = self.channel.filter(|c| !c.trim().is_empty());
        self
    }
}
