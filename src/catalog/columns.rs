//! SQL expressions that turn the text columns of `movies` into typed values.
//!
//! Every cast the catalog performs lives here, so a schema change only has
//! to be absorbed in this file.

/// Result columns of every catalog query, normalized to the types of
/// [`MovieRecord`](crate::db::MovieRecord).
pub const SELECT_COLUMNS: &str = concat!(
    r#"CAST("ID" AS INTEGER) AS id, "#,
    r#"CAST("Movie Name" AS TEXT) AS name, "#,
    r#"CAST("Genre" AS TEXT) AS genre, "#,
    r#"CAST("Stars" AS TEXT) AS stars, "#,
    r#"CAST("Directors" AS TEXT) AS directors, "#,
    r#"CAST("release_date" AS TEXT) AS release_date, "#,
    r#"CAST("Rating" AS TEXT) AS rating, "#,
    r#"CAST("Votes" AS TEXT) AS votes, "#,
    r#"CAST("Runtime" AS TEXT) AS runtime, "#,
    r#"CAST("budget" AS TEXT) AS budget, "#,
    r#"CAST("revenue" AS TEXT) AS revenue"#,
);

pub const ID: &str = r#""ID""#;
pub const NAME: &str = r#""Movie Name""#;
pub const GENRE: &str = r#""Genre""#;
pub const STARS: &str = r#""Stars""#;
pub const DIRECTORS: &str = r#""Directors""#;

/// Trailing four characters of `release_date`.
pub const RELEASE_YEAR: &str = r#"CAST(SUBSTR("release_date", -4) AS INTEGER)"#;

pub const RATING: &str = r#"CAST("Rating" AS REAL)"#;

/// `"142 min"` -> 142
pub const RUNTIME_MINUTES: &str = r#"CAST(REPLACE("Runtime", ' min', '') AS INTEGER)"#;

/// `(revenue - budget) / budget`, NULL when the budget is zero or missing.
pub const PROFITABILITY: &str = concat!(
    r#"((CAST("revenue" AS REAL) - CAST("budget" AS REAL)) "#,
    r#"/ NULLIF(CAST("budget" AS REAL), 0))"#,
);

/// `votes * rating`
pub const POPULARITY: &str = r#"(CAST("Votes" AS INTEGER) * CAST("Rating" AS REAL))"#;

/// Genre recommendation score. A zero (or missing) budget divides by 1,
/// which lets zero-budget titles rank on raw revenue.
pub const SMART_SCORE: &str = concat!(
    r#"((COALESCE(CAST("revenue" AS REAL), 0) "#,
    r#"/ COALESCE(NULLIF(CAST("budget" AS REAL), 0), 1)) * 0.4 "#,
    r#"+ (COALESCE(CAST("Votes" AS REAL), 0) / 100000) * 0.6) "#,
    r#"* COALESCE(CAST("Rating" AS REAL), 0)"#,
);
