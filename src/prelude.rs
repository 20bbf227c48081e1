pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use crate::policy::ConcurrentLruCache;
pub use crate::policy::{LruCache, OrderedLruCache};
pub use crate::stats::CacheStats;
pub use crate::trace::{count_faults, count_faults_scan};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
