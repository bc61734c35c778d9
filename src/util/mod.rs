mod query;

pub use query::{parse_int, QueryParams};
