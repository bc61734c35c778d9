pub mod handlers;
pub mod reviews;
pub mod trailer;
pub mod types;

pub use handlers::*;
pub use reviews::*;
pub use trailer::*;
pub use types::*;
