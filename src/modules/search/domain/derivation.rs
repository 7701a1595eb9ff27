//! Pure projection from the raw result set and the filter state to what the
//! user sees. Never mutates its inputs; same inputs give the same output.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::modules::search::domain::filter_state::{FilterState, SortKey};
use crate::modules::show::{Show, ShowId, ShowStatus};

pub fn derive_view(raw: &[Show], filter: &FilterState, favorites: &HashSet<ShowId>) -> Vec<Show> {
    let channel_needle = filter.channel.as_ref().map(|c| c.to_lowercase());

    let mut view: Vec<Show> = raw
        .iter()
        .filter(|show| filter.genre.as_ref().map_or(true, |genre| show.has_genre(genre)))
        .filter(|show| filter.status.as_ref().map_or(true, |status| &show.status == status))
        .filter(|show| {
            channel_needle.as_ref().map_or(true, |needle| {
                show.network
                    .as_ref()
                    .is_some_and(|network| network.to_lowercase().contains(needle.as_str()))
            })
        })
        .filter(|show| !filter.favorites_only || favorites.contains(&show.id))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal keys keep upstream order
    match filter.sort {
        SortKey::Relevance => {}
        SortKey::RatingDesc => {
            view.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()))
        }
        SortKey::NameAsc => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::YearDesc => view.sort_by(|a, b| b.premiere_year().cmp(&a.premiere_year())),
    }

    view
}

/// Case-folded comparison so "the Wire" sorts next to "The Office"; exact
/// text breaks ties between names that differ only in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct filterable values present in a result set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub statuses: Vec<ShowStatus>,
    pub channels: Vec<String>,
}

pub fn available_facets(raw: &[Show]) -> Facets {
    let genres: BTreeSet<&str> = raw
        .iter()
        .flat_map(|show| show.genres.iter().map(String::as_str))
        .collect();
    let channels: BTreeSet<&str> = raw.iter().filter_map(|show| show.network.as_deref()).collect();

    let mut statuses: Vec<ShowStatus> = Vec::new();
    for show in raw {
        if !statuses.contains(&show.status) {
            statuses.push(show.status.clone());
        }
    }

    Facets {
        genres: genres.into_iter().map(str::to_string).collect(),
        statuses,
        channels: channels.into_iter().map(str::to_string).collect(),
    }
}
