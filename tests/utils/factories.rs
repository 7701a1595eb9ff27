/// Test data factories using builder pattern
///
/// Provides convenient methods to create shows with sensible defaults
use chrono::NaiveDate;
use showscout_lib::modules::show::{Show, ShowId, ShowStatus};

pub struct ShowFactory {
    id: ShowId,
    name: String,
    rating: Option<f32>,
    premiered: Option<NaiveDate>,
    status: ShowStatus,
    genres: Vec<String>,
    network: Option<String>,
    image: Option<String>,
    summary: Option<String>,
}

impl Default for ShowFactory {
    fn default() -> Self {
        Self {
            id: ShowId::from(rand::random::<u32>() as u64 % 1_000_000 + 1_000),
            name: "Test Show".to_string(),
            rating: None,
            premiered: None,
            status: ShowStatus::Unknown,
            genres: Vec::new(),
            network: None,
            image: None,
            summary: None,
        }
    }
}

impl ShowFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(id: u64, name: &str) -> Self {
        Self::default().with_id(id).with_name(name)
    }

    pub fn complete() -> Self {
        Self::default()
            .with_name("Complete Test Show")
            .with_rating(8.5)
            .with_year(2015)
            .with_status(ShowStatus::Running)
            .with_genres(vec!["Drama", "Crime"])
            .with_network("HBO")
            .with_image("https://example.com/poster.jpg")
            .with_summary("A show with every field filled in")
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ShowId::from(id);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.premiered = NaiveDate::from_ymd_opt(year, 1, 1);
        self
    }

    pub fn with_status(mut self, status: ShowStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_genres(mut self, genres: Vec<&str>) -> Self {
        self.genres = genres.into_iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_network(mut self, network: &str) -> Self {
        self.network = Some(network.to_string());
        self
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn build(self) -> Show {
        let mut show = Show::new(self.id, self.name);
        show.rating = self.rating;
        show.premiered = self.premiered;
        show.status = self.status;
        show.genres = self.genres;
        show.network = self.network;
        show.image = self.image;
        show.summary = self.summary;
        show
    }
}

/// `count` shows on `network`, ids starting at `first_id`
pub fn shows_on(network: &str, first_id: u64, count: usize) -> Vec<Show> {
    (0..count as u64)
        .map(|i| {
            ShowFactory::named(first_id + i, &format!("{} Show {}", network, i))
                .with_network(network)
                .build()
        })
        .collect()
}

pub fn names(shows: &[Show]) -> Vec<String> {
    shows.iter().map(|s| s.name.clone()).collect()
}
