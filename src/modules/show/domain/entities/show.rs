use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::modules::show::domain::value_objects::{show_id::ShowId, show_status::ShowStatus};

/// A TV show as returned by the metadata API, already mapped into domain
/// shape. Summary markup is stripped by the mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    /// Average rating on a 0-10 scale
    pub rating: Option<f32>,
    pub premiered: Option<NaiveDate>,
    pub status: ShowStatus,
    pub genres: Vec<String>,
    /// Broadcast network or streaming channel name
    pub network: Option<String>,
    pub language: Option<String>,
    pub official_site: Option<String>,
    /// Upstream relevance score, only present on search results
    pub relevance: Option<f32>,
}

impl Show {
    pub fn new(id: impl Into<ShowId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            summary: None,
            rating: None,
            premiered: None,
            status: ShowStatus::Unknown,
            genres: Vec::new(),
            network: None,
            language: None,
            official_site: None,
            relevance: None,
        }
    }

    /// Rating with missing values treated as 0
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }

    /// Premiere year with missing dates treated as year 0
    pub fn premiere_year(&self) -> i32 {
        self.premiered.map(|date| date.year()).unwrap_or(0)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}
