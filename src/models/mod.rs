mod cache_entry;
mod movie;

pub use cache_entry::{CacheEntry, NewCacheEntry};
pub use movie::{Genre, MovieDetails, MovieId, MovieSummary, WatchProviders, WatchlistItem};
