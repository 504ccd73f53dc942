pub mod reading_cache;

pub use reading_cache::{CachedStatus, ReadingCache, StatusString, STATUS_MAX_LEN};
