pub mod client;
pub mod error;
pub mod logs;
pub mod traits;
pub mod watchlist;

pub use client::BackendClient;
pub use error::{ApiError, ApiResult};
pub use traits::{LogStore, WatchlistStore};
