use sqlx::{QueryBuilder, Sqlite};

use super::columns;
use crate::util::QueryParams;

pub const DEFAULT_LIMIT: i64 = 50;
pub const DEFAULT_MIN_YEAR: i64 = 1900;
pub const SEARCH_LIMIT: i64 = 10;

/// The fixed set of predicates a catalog query can carry. Each variant maps
/// to one SQL fragment; user input only ever reaches the query as a bound
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    MinYear(i64),
    /// Inclusive on both ends.
    YearBetween(i64, i64),
    NameContains(String),
    GenreContains(String),
    StarsContains(String),
    DirectorsContains(String),
    IdEq(i64),
    IdIn(Vec<i64>),
    ExcludeId(i64),
}

impl Predicate {
    fn push_to(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        qb.push(" AND ");
        match self {
            Predicate::MinYear(year) => {
                qb.push(columns::RELEASE_YEAR).push(" >= ").push_bind(*year);
            }
            Predicate::YearBetween(from, to) => {
                qb.push(columns::RELEASE_YEAR)
                    .push(" BETWEEN ")
                    .push_bind(*from)
                    .push(" AND ")
                    .push_bind(*to);
            }
            Predicate::NameContains(s) => push_contains(qb, columns::NAME, s),
            Predicate::GenreContains(s) => push_contains(qb, columns::GENRE, s),
            Predicate::StarsContains(s) => push_contains(qb, columns::STARS, s),
            Predicate::DirectorsContains(s) => push_contains(qb, columns::DIRECTORS, s),
            Predicate::IdEq(id) => {
                qb.push(columns::ID).push(" = ").push_bind(*id);
            }
            Predicate::IdIn(ids) if ids.is_empty() => {
                qb.push("0");
            }
            Predicate::IdIn(ids) => {
                qb.push(columns::ID).push(" IN (");
                let mut separated = qb.separated(", ");
                for id in ids {
                    separated.push_bind(*id);
                }
                separated.push_unseparated(")");
            }
            Predicate::ExcludeId(id) => {
                qb.push(columns::ID).push(" != ").push_bind(*id);
            }
        }
    }
}

/// Case-insensitive (ASCII) substring match. LIKE wildcards in the needle
/// are escaped so they match literally.
fn push_contains(qb: &mut QueryBuilder<'static, Sqlite>, column: &str, needle: &str) {
    qb.push(column)
        .push(" LIKE ")
        .push_bind(like_pattern(needle))
        .push(r" ESCAPE '\'");
}

fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Library sort modes, as accepted in the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    RatingDesc,
    DateDesc,
    DurationDesc,
    SuccessDesc,
    SuccessAsc,
}

impl SortMode {
    /// Unknown or missing values fall back to `rating_desc`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("date_desc") => SortMode::DateDesc,
            Some("duration_desc") => SortMode::DurationDesc,
            Some("success_desc") => SortMode::SuccessDesc,
            Some("success_asc") => SortMode::SuccessAsc,
            _ => SortMode::RatingDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::RatingDesc => "rating_desc",
            SortMode::DateDesc => "date_desc",
            SortMode::DurationDesc => "duration_desc",
            SortMode::SuccessDesc => "success_desc",
            SortMode::SuccessAsc => "success_asc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Library(SortMode),
    /// `votes * rating`, descending.
    Popularity,
    /// Genre recommendation score, descending.
    SmartScore,
}

impl OrderKey {
    // Ties are broken on the id in the same direction as the key, so an
    // ascending and a descending sort over the same rows mirror each other.
    // SQLite sorts NULL keys first ascending and last descending.
    fn push_to(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        let (key, direction) = match self {
            OrderKey::Library(SortMode::RatingDesc) => (columns::RATING, "DESC"),
            OrderKey::Library(SortMode::DateDesc) => (columns::RELEASE_YEAR, "DESC"),
            OrderKey::Library(SortMode::DurationDesc) => (columns::RUNTIME_MINUTES, "DESC"),
            OrderKey::Library(SortMode::SuccessDesc) => (columns::PROFITABILITY, "DESC"),
            OrderKey::Library(SortMode::SuccessAsc) => (columns::PROFITABILITY, "ASC"),
            OrderKey::Popularity => (columns::POPULARITY, "DESC"),
            OrderKey::SmartScore => ("smart_score", "DESC"),
        };
        qb.push(" ORDER BY ")
            .push(key)
            .push(" ")
            .push(direction)
            .push(", ")
            .push(columns::ID)
            .push(" ")
            .push(direction);
    }
}

/// A catalog query: a conjunction of whitelisted predicates plus an
/// optional ordering and page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogQuery {
    predicates: Vec<Predicate>,
    order: Option<OrderKey>,
    limit: Option<i64>,
    offset: i64,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: i64) -> Self {
        Self::new().filter(Predicate::IdEq(id)).limit(1)
    }

    pub fn by_ids(ids: Vec<i64>) -> Self {
        Self::new().filter(Predicate::IdIn(ids))
    }

    pub fn search(name: &str) -> Self {
        Self::new()
            .filter(Predicate::NameContains(name.to_string()))
            .limit(SEARCH_LIMIT)
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, key: OrderKey) -> Self {
        self.order = Some(key);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order(&self) -> Option<OrderKey> {
        self.order
    }

    pub fn to_sql(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(columns::SELECT_COLUMNS);
        if self.order == Some(OrderKey::SmartScore) {
            qb.push(", ").push(columns::SMART_SCORE).push(" AS smart_score");
        }
        qb.push(" FROM movies WHERE 1=1");

        for predicate in &self.predicates {
            predicate.push_to(&mut qb);
        }

        if let Some(order) = self.order {
            order.push_to(&mut qb);
        }

        if let Some(limit) = self.limit {
            qb.push(" LIMIT ").push_bind(limit);
            qb.push(" OFFSET ").push_bind(self.offset);
        }

        qb
    }
}

/// Parameters of the library listing.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryFilter {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortMode,
    pub min_year: i64,
    pub genre: Option<String>,
    pub actor: Option<String>,
    pub director: Option<String>,
}

impl Default for LibraryFilter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: SortMode::default(),
            min_year: DEFAULT_MIN_YEAR,
            genre: None,
            actor: None,
            director: None,
        }
    }
}

impl LibraryFilter {
    /// Malformed numbers never fail the request, they fall back to the
    /// defaults: a non-positive `limit` or a zero `year` count as absent,
    /// a negative `offset` becomes 0.
    pub fn from_params(params: &QueryParams) -> Self {
        let limit = params
            .get_int("limit")
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = params.get_int("offset").unwrap_or(0).max(0);
        let min_year = params
            .get_int("year")
            .filter(|y| *y != 0)
            .unwrap_or(DEFAULT_MIN_YEAR);

        Self {
            limit,
            offset,
            sort: SortMode::parse(params.get("sort")),
            min_year,
            genre: params.get_non_empty("genre").map(str::to_string),
            actor: params.get_non_empty("actor").map(str::to_string),
            director: params.get_non_empty("director").map(str::to_string),
        }
    }

    pub fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::new().filter(Predicate::MinYear(self.min_year));

        if let Some(ref genre) = self.genre {
            query = query.filter(Predicate::GenreContains(genre.clone()));
        }
        if let Some(ref actor) = self.actor {
            query = query.filter(Predicate::StarsContains(actor.clone()));
        }
        if let Some(ref director) = self.director {
            query = query.filter(Predicate::DirectorsContains(director.clone()));
        }

        query
            .order_by(OrderKey::Library(self.sort))
            .limit(self.limit)
            .offset(self.offset)
    }
}
