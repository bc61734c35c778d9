use super::query::{CatalogQuery, OrderKey, Predicate};

pub const RECOMMENDATION_LIMIT: i64 = 20;

/// Years on either side of the target year a timeline recommendation covers.
pub const TIMELINE_WINDOW: i64 = 5;

/// "More like this" strategies. Each one is a single scored query.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Titles sharing the first genre of a comma-separated list, ranked by
    /// smart score.
    Genre(String),
    Cast(String),
    Director(String),
    /// Titles released within five years of the given year.
    Timeline(i64),
}

impl Recommendation {
    /// Uses the first genre only. `None` when there is nothing to match.
    pub fn genre(genres: &str) -> Option<Self> {
        let first = genres.split(',').next().unwrap_or("").trim();
        if first.is_empty() {
            return None;
        }
        Some(Recommendation::Genre(first.to_string()))
    }

    pub fn cast(name: &str) -> Option<Self> {
        non_empty(name).map(Recommendation::Cast)
    }

    pub fn director(name: &str) -> Option<Self> {
        non_empty(name).map(Recommendation::Director)
    }

    /// A missing or zero year yields `None`.
    pub fn timeline(year: Option<i64>) -> Option<Self> {
        year.filter(|y| *y != 0).map(Recommendation::Timeline)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::Genre(_) => "genre",
            Recommendation::Cast(_) => "cast",
            Recommendation::Director(_) => "director",
            Recommendation::Timeline(_) => "timeline",
        }
    }

    pub fn to_query(&self, exclude: Option<i64>) -> CatalogQuery {
        let query = match self {
            Recommendation::Genre(genre) => CatalogQuery::new()
                .filter(Predicate::GenreContains(genre.clone()))
                .order_by(OrderKey::SmartScore),
            Recommendation::Cast(name) => CatalogQuery::new()
                .filter(Predicate::StarsContains(name.clone()))
                .order_by(OrderKey::Popularity),
            Recommendation::Director(name) => CatalogQuery::new()
                .filter(Predicate::DirectorsContains(name.clone()))
                .order_by(OrderKey::Popularity),
            Recommendation::Timeline(year) => CatalogQuery::new()
                .filter(Predicate::YearBetween(
                    year.saturating_sub(TIMELINE_WINDOW),
                    year.saturating_add(TIMELINE_WINDOW),
                ))
                .order_by(OrderKey::Popularity),
        };

        let query = match exclude {
            Some(id) => query.filter(Predicate::ExcludeId(id)),
            None => query,
        };

        query.limit(RECOMMENDATION_LIMIT)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
