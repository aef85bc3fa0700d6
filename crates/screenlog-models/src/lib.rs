pub mod content;
pub mod log;
pub mod rating;
pub mod status;
pub mod watchlist;

pub use content::{ContentKey, ContentType};
pub use log::LogRecord;
pub use rating::{is_valid_rating, normalize_rating};
pub use status::WatchStatus;
pub use watchlist::{WatchlistRecord, WatchlistStatus};
