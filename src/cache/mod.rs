// Cache module.
// In-memory TTL cache for API responses and derived tables, plus filesystem locations.

pub mod clock;
pub mod paths;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use paths::cache_dir;
pub use store::{CacheKey, CachedData, DEFAULT_TTL, ResponseCache};
