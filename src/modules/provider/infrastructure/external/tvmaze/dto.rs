// TVmaze API models
// Only the fields the search client reads are modelled; everything else is
// ignored by serde.

use serde::{Deserialize, Serialize};

/// One entry of `GET /search/shows?q=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvMazeSearchHit {
    #[serde(default)]
    pub score: Option<f32>,
    pub show: TvMazeShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvMazeShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub official_site: Option<String>,
    #[serde(default)]
    pub rating: Option<TvMazeRating>,
    #[serde(default)]
    pub network: Option<TvMazeChannel>,
    #[serde(default)]
    pub web_channel: Option<TvMazeChannel>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvMazeRating {
    #[serde(default)]
    pub average: Option<f32>,
}

/// Shared shape of `network` and `webChannel`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvMazeChannel {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}
