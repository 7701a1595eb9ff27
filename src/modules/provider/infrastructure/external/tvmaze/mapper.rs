use crate::modules::show::{Show, ShowId, ShowStatus};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use super::dto::{TvMazeImage, TvMazeSearchHit, TvMazeShow};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

pub struct TvMazeMapper;

impl TvMazeMapper {
    pub fn to_domain(dto: TvMazeShow) -> Show {
        Show {
            id: ShowId::from(dto.id),
            image: Self::extract_image_url(dto.image.as_ref()),
            summary: dto.summary.as_deref().map(Self::strip_markup).filter(|s| !s.is_empty()),
            rating: dto.rating.and_then(|r| r.average).map(|r| r.clamp(0.0, 10.0)),
            premiered: dto.premiered.as_deref().and_then(Self::parse_date),
            status: dto.status.map(ShowStatus::from).unwrap_or_default(),
            network: dto.network.or(dto.web_channel).map(|channel| channel.name),
            language: dto.language,
            official_site: dto.official_site,
            genres: dto.genres,
            name: dto.name,
            relevance: None,
        }
    }

    pub fn hit_to_domain(hit: TvMazeSearchHit) -> Show {
        let mut show = Self::to_domain(hit.show);
        show.relevance = hit.score;
        show
    }

    /// Remove tags, decode the handful of entities TVmaze emits and collapse
    /// whitespace.
    pub fn strip_markup(html: &str) -> String {
        let without_tags = TAG_RE.replace_all(html, " ");
        let decoded = without_tags
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&apos;", "'")
            .replace("&amp;", "&");

        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn extract_image_url(image: Option<&TvMazeImage>) -> Option<String> {
        image.and_then(|img| img.medium.clone().or_else(|| img.original.clone()))
    }

    fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}
